use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use offroute::{Coordinate, Language, Options, Profile, RouteResult};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// GeoJSON FeatureCollection with the route line and instruction points
    Geojson,

    /// The route result, serialized as-is
    Json,

    /// One instruction per line
    Text,
}

/// Find a route around the Chicoana plaza
#[derive(Parser)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Latitude of the start point
    start_lat: f64,

    /// Longitude of the start point
    start_lng: f64,

    /// Latitude of the end point
    end_lat: f64,

    /// Longitude of the end point
    end_lng: f64,

    /// Travel mode: walking, driving or cycling
    #[arg(short, long, default_value_t = Profile::Walking)]
    profile: Profile,

    /// Language of the instructions: es or en
    #[arg(short, long, default_value_t = Language::Spanish)]
    language: Language,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Geojson)]
    format: Format,
}

pub fn main() -> Result<ExitCode, Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let g = offroute::chicoana::graph()?;
    let start = Coordinate::new(cli.start_lat, cli.start_lng);
    let end = Coordinate::new(cli.end_lat, cli.end_lng);

    for (label, position) in [("start", start), ("end", end)] {
        if let Some(node) = g.find_nearest_node(position) {
            log::info!(
                "{} snapped to {} ({:.1} m away)",
                label,
                node.id,
                offroute::earth_distance(position, node.position()),
            );
        }
    }

    let options = Options {
        profile: cli.profile,
        language: cli.language,
    };

    let Some(route) = offroute::calculate_route(&g, start, end, &options)? else {
        eprintln!("no {} route found", cli.profile);
        return Ok(ExitCode::FAILURE);
    };

    match cli.format {
        Format::Geojson => println!("{:#}", to_geojson(&route, cli.profile)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&route)?),
        Format::Text => print_text(&route),
    }

    Ok(ExitCode::SUCCESS)
}

fn to_geojson(route: &RouteResult, profile: Profile) -> serde_json::Value {
    let line = json!({
        "type": "Feature",
        "properties": {
            "profile": profile,
            "distance": route.distance,
            "duration": route.duration,
        },
        "geometry": {
            "type": "LineString",
            "coordinates": route.path.iter().map(|c| [c.lng, c.lat]).collect::<Vec<_>>(),
        },
    });

    let points = route.instructions.iter().map(|i| {
        json!({
            "type": "Feature",
            "properties": {
                "kind": i.kind,
                "text": i.text,
                "distance": i.distance,
            },
            "geometry": {
                "type": "Point",
                "coordinates": [i.point.lng, i.point.lat],
            },
        })
    });

    json!({
        "type": "FeatureCollection",
        "features": std::iter::once(line).chain(points).collect::<Vec<_>>(),
    })
}

fn print_text(route: &RouteResult) {
    for (n, i) in route.instructions.iter().enumerate() {
        if i.distance > 0.0 {
            println!("{:>2}. {} ({} m)", n + 1, i.text, i.distance);
        } else {
            println!("{:>2}. {}", n + 1, i.text);
        }
    }
    println!(
        "{} m, about {} min",
        route.distance,
        route.duration.div_ceil(60),
    );
}
