// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};

use crate::{planar_distance, Coordinate, Edge, Node, RoadType};

/// Error conditions which may occur when assembling a [Graph] with a [GraphBuilder].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate node: {0}")]
    DuplicateNode(String),

    #[error("node {0} has an invalid position")]
    InvalidPosition(String),

    #[error("edge references an unknown node: {0}")]
    UnknownNode(String),

    #[error("edge {from} -> {to} has an invalid distance")]
    InvalidDistance { from: String, to: String },

    #[error("edge {from} -> {to} has a street name containing a NUL character")]
    InvalidStreetName { from: String, to: String },
}

/// Represents a road network as a set of [Nodes](Node)
/// and directed [Edges](Edge) between them.
///
/// A Graph can't be modified once built - use a [GraphBuilder] to create one.
/// Nodes and their outgoing edges are kept in declaration order, which
/// makes nearest-node and route search results deterministic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<(Node, Vec<Edge>)>,
    index: HashMap<String, usize>,
}

impl Graph {
    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if there are no nodes in the graph.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|(_, edges)| edges.len()).sum()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().map(|(node, _)| node)
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|idx| self.node_at(idx))
    }

    /// Gets all outgoing [Edges](Edge) from a node with a given id, in declaration order.
    pub fn get_edges(&self, from_id: &str) -> &[Edge] {
        self.index_of(from_id)
            .map(|idx| self.edges_at(idx))
            .unwrap_or_default()
    }

    /// Gets the first declared [Edge] from one node to another.
    pub fn get_edge(&self, from_id: &str, to_id: &str) -> Option<&Edge> {
        self.get_edges(from_id).iter().find(|e| e.to == to_id)
    }

    /// Finds the closest [Node] to the given position.
    ///
    /// Distance is measured in raw degrees (see [planar_distance]), and ties
    /// go to the node declared first. This function requires computing the distance
    /// to every [Node] in the graph, and is not suitable for large graphs.
    ///
    /// Returns `None` only if the graph is empty.
    pub fn find_nearest_node(&self, position: Coordinate) -> Option<&Node> {
        let mut nearest: Option<(f64, &Node)> = None;
        for node in self.iter() {
            let dist = planar_distance(position, node.position());
            if nearest.map_or(true, |(best, _)| dist < best) {
                nearest = Some((dist, node));
            }
        }
        nearest.map(|(_, node)| node)
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx].0
    }

    pub(crate) fn edges_at(&self, idx: usize) -> &[Edge] {
        &self.nodes[idx].1
    }
}

/// Helper object used for assembling a [Graph].
///
/// Nodes must be added before any edge referencing them.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    g: Graph,
}

impl GraphBuilder {
    /// Create a new, empty graph builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a [Node]. Its id must not have been used before.
    pub fn add_node(&mut self, node: Node) -> Result<&mut Self, GraphError> {
        if !node.position().is_valid() {
            return Err(GraphError::InvalidPosition(node.id));
        }

        match self.g.index.entry(node.id.clone()) {
            Entry::Occupied(_) => return Err(GraphError::DuplicateNode(node.id)),
            Entry::Vacant(e) => {
                e.insert(self.g.nodes.len());
            }
        }

        self.g.nodes.push((node, Vec::default()));
        Ok(self)
    }

    /// Adds a directed [Edge] between two previously added nodes.
    pub fn add_edge(&mut self, edge: Edge) -> Result<&mut Self, GraphError> {
        if !edge.distance.is_finite() || edge.distance < 0.0 {
            return Err(GraphError::InvalidDistance {
                from: edge.from,
                to: edge.to,
            });
        }

        if edge.street_name.contains('\0') {
            return Err(GraphError::InvalidStreetName {
                from: edge.from,
                to: edge.to,
            });
        }

        let from_idx = self
            .g
            .index_of(&edge.from)
            .ok_or_else(|| GraphError::UnknownNode(edge.from.clone()))?;

        if self.g.index_of(&edge.to).is_none() {
            return Err(GraphError::UnknownNode(edge.to));
        }

        self.g.nodes[from_idx].1.push(edge);
        Ok(self)
    }

    /// Adds a pair of opposite [Edges](Edge) for a street usable in both directions.
    pub fn add_two_way(
        &mut self,
        a: &str,
        b: &str,
        distance: f64,
        street_name: &str,
        road_type: RoadType,
    ) -> Result<&mut Self, GraphError> {
        self.add_edge(Edge::new(a, b, distance, street_name, road_type))?;
        self.add_edge(Edge::new(b, a, distance, street_name, road_type))
    }

    /// Finishes building, returning the immutable [Graph].
    pub fn build(self) -> Graph {
        self.g
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_node(Node::new("a", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("b", 0.0, 0.001)).unwrap();
        b.add_node(Node::new("c", 0.001, 0.0)).unwrap();
        b.add_two_way("a", "b", 111.0, "First", RoadType::Road)
            .unwrap();
        b.add_edge(Edge::new("b", "c", 157.0, "Second", RoadType::Path))
            .unwrap();
        b.add_edge(Edge::new("a", "c", 200.0, "Slow", RoadType::Highway))
            .unwrap();
        b.add_edge(Edge::new("a", "c", 111.0, "Fast", RoadType::Road))
            .unwrap();
        b.build()
    }

    #[test]
    fn empty_build() {
        let g = GraphBuilder::new().build();
        assert!(g.is_empty());
        assert_eq!(g.len(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.find_nearest_node(Coordinate::new(0.0, 0.0)), None);
    }

    #[test]
    fn lookups() {
        let g = triangle();
        assert_eq!(g.len(), 3);
        assert_eq!(g.edge_count(), 5);

        assert_eq!(g.get_node("b").map(|n| n.lng), Some(0.001));
        assert_eq!(g.get_node("x"), None);

        let to: Vec<&str> = g.get_edges("a").iter().map(|e| e.to.as_str()).collect();
        assert_eq!(to, ["b", "c", "c"]);
        assert!(g.get_edges("c").is_empty());
        assert!(g.get_edges("x").is_empty());

        assert_eq!(g.get_edge("a", "c").map(|e| e.street_name.as_str()), Some("Slow"));
        assert_eq!(g.get_edge("c", "a"), None);

        let ids: Vec<&str> = g.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn nearest_node() {
        let g = triangle();
        assert_eq!(
            g.find_nearest_node(Coordinate::new(0.0001, 0.0009)).map(|n| n.id.as_str()),
            Some("b"),
        );
        assert_eq!(
            g.find_nearest_node(Coordinate::new(5.0, -5.0)).map(|n| n.id.as_str()),
            Some("c"),
        );
    }

    #[test]
    fn nearest_node_tie_goes_to_first_declared() {
        let mut b = GraphBuilder::new();
        b.add_node(Node::new("east", 0.0, 1.0)).unwrap();
        b.add_node(Node::new("west", 0.0, -1.0)).unwrap();
        let g = b.build();

        assert_eq!(
            g.find_nearest_node(Coordinate::new(0.0, 0.0)).map(|n| n.id.as_str()),
            Some("east"),
        );
    }

    #[test]
    fn builder_errors() {
        let mut b = GraphBuilder::new();
        b.add_node(Node::new("a", 0.0, 0.0)).unwrap();

        assert_eq!(
            b.add_node(Node::new("a", 1.0, 1.0)).unwrap_err(),
            GraphError::DuplicateNode("a".to_string()),
        );
        assert_eq!(
            b.add_node(Node::new("nan", f64::NAN, 0.0)).unwrap_err(),
            GraphError::InvalidPosition("nan".to_string()),
        );
        assert_eq!(
            b.add_edge(Edge::new("a", "z", 1.0, "Nowhere", RoadType::Road))
                .unwrap_err(),
            GraphError::UnknownNode("z".to_string()),
        );
        assert_eq!(
            b.add_edge(Edge::new("z", "a", 1.0, "Nowhere", RoadType::Road))
                .unwrap_err(),
            GraphError::UnknownNode("z".to_string()),
        );
        assert_eq!(
            b.add_edge(Edge::new("a", "a", -1.0, "Loop", RoadType::Road))
                .unwrap_err(),
            GraphError::InvalidDistance {
                from: "a".to_string(),
                to: "a".to_string(),
            },
        );
        assert_eq!(
            b.add_edge(Edge::new("a", "a", 1.0, "Nul\0Street", RoadType::Road))
                .unwrap_err(),
            GraphError::InvalidStreetName {
                from: "a".to_string(),
                to: "a".to_string(),
            },
        );

        // Failed insertions must leave the builder untouched
        let g = b.build();
        assert_eq!(g.len(), 1);
        assert_eq!(g.edge_count(), 0);
    }
}
