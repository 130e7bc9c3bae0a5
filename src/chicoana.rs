// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Hand-authored road graph around the main plaza of Chicoana, Salta.
//!
//! The plaza is a square of four streets (El Carmen to the north, España to the east,
//! Libertad to the south and 25 de Mayo to the west), crossed by footpaths meeting at
//! its center. Libertad and España continue away from the plaza.

use crate::{Edge, Graph, GraphBuilder, GraphError, Node, RoadType};

/// Nodes, as (id, latitude, longitude).
const NODES: &[(&str, f64, f64)] = &[
    ("plaza_center", -25.10445, -65.53455),
    ("plaza_norte", -25.10405, -65.53455),
    ("plaza_sur", -25.10485, -65.53455),
    ("plaza_este", -25.10445, -65.53410),
    ("plaza_oeste", -25.10445, -65.53500),
    ("esq_no", -25.10405, -65.53500),
    ("esq_ne", -25.10405, -65.53410),
    ("esq_so", -25.10485, -65.53500),
    ("esq_se", -25.10485, -65.53410),
    ("church", -25.10390, -65.53455),
    ("user_start", -25.10600, -65.53455),
    ("libertad_oeste", -25.10485, -65.53600),
    ("libertad_este", -25.10485, -65.53300),
    ("espana_norte", -25.10300, -65.53410),
    ("espana_sur", -25.10600, -65.53410),
];

/// Streets usable in both directions, as (a, b, meters, street name, road type).
const TWO_WAY: &[(&str, &str, f64, &str, RoadType)] = &[
    // Plaza perimeter
    ("esq_no", "esq_ne", 90.0, "El Carmen", RoadType::Road),
    ("esq_ne", "esq_se", 90.0, "España", RoadType::Road),
    ("esq_se", "esq_so", 90.0, "Libertad", RoadType::Road),
    ("esq_so", "esq_no", 90.0, "25 de Mayo", RoadType::Road),
    // Footpaths across the plaza
    ("plaza_norte", "plaza_center", 45.0, "Plaza", RoadType::Path),
    ("plaza_sur", "plaza_center", 45.0, "Plaza", RoadType::Path),
    ("plaza_este", "plaza_center", 45.0, "Plaza", RoadType::Path),
    ("plaza_oeste", "plaza_center", 45.0, "Plaza", RoadType::Path),
];

/// Streets usable in a single direction, as (from, to, meters, street name, road type).
///
/// The perimeter spurs reach the plaza entrances going east to west only.
const ONE_WAY: &[(&str, &str, f64, &str, RoadType)] = &[
    ("esq_ne", "plaza_norte", 45.0, "El Carmen", RoadType::Road),
    ("plaza_norte", "esq_no", 45.0, "El Carmen", RoadType::Road),
    ("esq_se", "plaza_sur", 45.0, "Libertad", RoadType::Road),
    ("plaza_sur", "esq_so", 45.0, "Libertad", RoadType::Road),
];

/// Streets leaving the plaza, as (a, b, meters, street name, road type), usable in both directions.
const OUTGOING: &[(&str, &str, f64, &str, RoadType)] = &[
    ("esq_so", "libertad_oeste", 200.0, "Libertad", RoadType::Road),
    ("esq_se", "libertad_este", 200.0, "Libertad", RoadType::Road),
    ("esq_se", "espana_sur", 200.0, "España", RoadType::Road),
    ("espana_sur", "user_start", 10.0, "España", RoadType::Road),
];

/// Builds the Chicoana plaza [Graph].
///
/// `church` and `espana_norte` have no edges; any route to or from them
/// is reported as unreachable.
pub fn graph() -> Result<Graph, GraphError> {
    let mut builder = GraphBuilder::new();

    for &(id, lat, lng) in NODES {
        builder.add_node(Node::new(id, lat, lng))?;
    }

    for &(a, b, distance, street, road_type) in TWO_WAY {
        builder.add_two_way(a, b, distance, street, road_type)?;
    }

    for &(from, to, distance, street, road_type) in ONE_WAY {
        let mut edge = Edge::new(from, to, distance, street, road_type);
        edge.one_way = true;
        builder.add_edge(edge)?;
    }

    for &(a, b, distance, street, road_type) in OUTGOING {
        builder.add_two_way(a, b, distance, street, road_type)?;
    }

    Ok(builder.build())
}
