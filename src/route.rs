// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{
    find_route, generate_instructions, AStarError, Coordinate, Graph, Language,
    NavigationInstruction, Profile,
};

/// Error conditions which may occur during [calculate_route].
///
/// Not finding a route is not an error - it's reported as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// A coordinate was NaN, infinite, or out of the valid latitude/longitude range.
    #[error("invalid coordinate: ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Nodes resolved from the graph weren't found in that graph.
    #[error(transparent)]
    Search(#[from] AStarError),
}

/// Additional controls for [calculate_route].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Travel mode, restricting usable roads and setting the speed for duration estimates.
    pub profile: Profile,

    /// Language of the generated instructions.
    pub language: Language,
}

/// Route between two positions, ready to be presented to the traveler.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Positions of all traversed nodes, from start to end inclusive.
    pub path: Vec<Coordinate>,

    /// Sum of traversed edge lengths, in meters.
    pub distance: f64,

    /// Estimated travel time, in seconds, at the [Profile] speed.
    pub duration: u64,

    pub instructions: Vec<NavigationInstruction>,
}

fn check_coordinate(c: Coordinate) -> Result<(), RouteError> {
    if c.is_valid() {
        Ok(())
    } else {
        Err(RouteError::InvalidCoordinate {
            lat: c.lat,
            lng: c.lng,
        })
    }
}

/// Finds a route between two arbitrary positions.
///
/// Both positions are snapped onto their [nearest nodes](Graph::find_nearest_node),
/// which are then connected with [find_route]. The resulting path starts and ends
/// at the snapped nodes, not at the requested positions.
///
/// Returns `Ok(None)` if the graph is empty, or if there is no route between
/// the snapped nodes usable with the selected [Profile].
pub fn calculate_route(
    g: &Graph,
    start: Coordinate,
    end: Coordinate,
    options: &Options,
) -> Result<Option<RouteResult>, RouteError> {
    check_coordinate(start)?;
    check_coordinate(end)?;

    let (Some(from), Some(to)) = (g.find_nearest_node(start), g.find_nearest_node(end)) else {
        log::debug!("routing unavailable: empty graph");
        return Ok(None);
    };
    log::debug!("snapped start to {}, end to {}", from.id, to.id);

    let Some(path) = find_route(g, &from.id, &to.id, options.profile)? else {
        return Ok(None);
    };

    let distance = path.distance();
    Ok(Some(RouteResult {
        path: path.positions(),
        distance,
        duration: options.profile.estimate_duration(distance),
        instructions: generate_instructions(&path, options.language),
    }))
}

/// Finds a route between two arbitrary positions, with instructions in the
/// default [Language]. See [calculate_route].
pub fn calculate_offline_route(
    g: &Graph,
    start: Coordinate,
    end: Coordinate,
    profile: Profile,
) -> Result<Option<RouteResult>, RouteError> {
    calculate_route(
        g,
        start,
        end,
        &Options {
            profile,
            ..Options::default()
        },
    )
}
