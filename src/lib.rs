// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Offline, turn-by-turn routing over small hand-authored road graphs.
//!
//! A [Graph] is built once (see [GraphBuilder] and the bundled [chicoana] town graph)
//! and then only read. Routing snaps both endpoints onto their nearest [Node],
//! runs A* with a [Profile]-dependent edge filter, and turns the resulting path into
//! a [RouteResult] with human-readable [NavigationInstructions](NavigationInstruction).
//!
//! # Example
//!
//! ```
//! let g = offroute::chicoana::graph().expect("bundled graph must be valid");
//!
//! let route = offroute::calculate_offline_route(
//!     &g,
//!     offroute::Coordinate::new(-25.10600, -65.53455),
//!     offroute::Coordinate::new(-25.10445, -65.53455),
//!     offroute::Profile::Walking,
//! )
//! .expect("coordinates are valid")
//! .expect("plaza is reachable on foot");
//!
//! for instruction in &route.instructions {
//!     println!("{} ({} m)", instruction.text, instruction.distance);
//! }
//! ```

mod astar;
pub mod c;
pub mod chicoana;
mod distance;
mod graph;
mod instructions;
mod profile;
mod route;

pub use astar::{find_route, AStarError, Path};
pub use distance::{earth_distance, planar_distance, METERS_PER_DEGREE};
pub use graph::{Graph, GraphBuilder, GraphError};
pub use instructions::{
    generate_instructions, turn_angle, InstructionKind, Language, NavigationInstruction,
    ParseLanguageError, TURN_THRESHOLD,
};
pub use profile::{ParseProfileError, Profile};
pub use route::{calculate_offline_route, calculate_route, Options, RouteError, RouteResult};

/// A plain geographic position, in signed decimal degrees.
///
/// Coordinates are only ever used as query inputs and outputs;
/// they are resolved onto the nearest [Node] before routing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true if both values are finite and within
    /// the [-90, 90] latitude and [-180, 180] longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
    }
}

/// Kind of road an [Edge] runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(C)]
pub enum RoadType {
    /// Ordinary street, open to every [Profile].
    Road,

    /// Footpath, e.g. the walkways crossing a plaza. Not open to [Profile::Driving].
    Path,

    /// Arterial road.
    Highway,
}

/// Represents an element of the [Graph].
///
/// Nodes are identified by a stable string key, unique within a graph.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: String,
    pub lat: f64,
    pub lng: f64,

    /// Free-form labels; not interpreted by the router.
    pub tags: Vec<String>,
}

impl Node {
    /// Creates an untagged node.
    pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            tags: Vec::default(),
        }
    }

    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Represents a directed connection between two [Nodes](Node).
///
/// Edges are never implicitly bidirectional; a street usable in both directions
/// needs two edges (see [GraphBuilder::add_two_way]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: String,
    pub to: String,

    /// Length of the edge, in meters.
    pub distance: f64,

    /// Display name of the street, used in instructions.
    pub street_name: String,

    pub road_type: RoadType,

    /// Descriptive only - direction is expressed by which edges exist.
    pub one_way: bool,

    /// Descriptive only, in km/h - travel time uses flat [Profile] speeds.
    pub speed_limit: Option<u32>,
}

impl Edge {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        distance: f64,
        street_name: impl Into<String>,
        road_type: RoadType,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
            street_name: street_name.into(),
            road_type,
            one_way: false,
            speed_limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_validity() {
        assert!(Coordinate::new(-25.10445, -65.53455).is_valid());
        assert!(Coordinate::new(90.0, -180.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.1).is_valid());
    }
}
