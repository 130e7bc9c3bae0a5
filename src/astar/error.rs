// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Error conditions which may occur during [find_route](crate::find_route).
///
/// Not finding a route is not an error - it's reported as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AStarError {
    /// The start or end nodes don't exist in a graph.
    ///
    /// Node ids passed to the router should come from the graph itself,
    /// so this indicates a bug in the caller.
    InvalidReference(String),
}

impl std::fmt::Display for AStarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReference(node_id) => write!(f, "invalid node: {}", node_id),
        }
    }
}

impl std::error::Error for AStarError {}
