// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::{planar_distance, AStarError, Coordinate, Edge, Graph, Node, Profile, METERS_PER_DEGREE};

/// Sequence of [Nodes](Node) and the [Edges](Edge) joining them, as found by [find_route].
///
/// `edges[i]` leads from `nodes[i]` to `nodes[i + 1]`, thus there's always
/// one edge less than nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<'a> {
    pub nodes: Vec<&'a Node>,
    pub edges: Vec<&'a Edge>,
}

impl<'a> Path<'a> {
    /// Total length of the traversed edges, in meters.
    pub fn distance(&self) -> f64 {
        self.edges.iter().fold(0.0, |total, e| total + e.distance)
    }

    /// Positions of all nodes, from start to end.
    pub fn positions(&self) -> Vec<Coordinate> {
        self.nodes.iter().map(|n| n.position()).collect()
    }
}

/// Estimated remaining cost from `node` to `goal`, in meters.
///
/// Degrees are converted with a single [METERS_PER_DEGREE] factor, which overestimates
/// east-west distances away from the equator. The estimate is therefore not strictly
/// admissible; at town scale the resulting paths are still shortest in practice.
fn heuristic(node: &Node, goal: &Node) -> f64 {
    planar_distance(node.position(), goal.position()) * METERS_PER_DEGREE
}

/// Finds the position in `open` of the node with the lowest score.
/// Ties go to the earliest inserted node.
///
/// This is a linear scan, making the whole search O(n²). That's fine for
/// town-sized graphs, larger ones would need a binary heap.
fn select_best(open: &[usize], scores: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (pos, &idx) in open.iter().enumerate() {
        if best.map_or(true, |b| scores[idx] < scores[open[b]]) {
            best = Some(pos);
        }
    }
    best
}

fn reconstruct_path<'a>(
    g: &'a Graph,
    came_from: &HashMap<usize, (usize, &'a Edge)>,
    mut last: usize,
) -> Path<'a> {
    let mut nodes = vec![g.node_at(last)];
    let mut edges = Vec::default();

    while let Some(&(prev, edge)) = came_from.get(&last) {
        edges.push(edge);
        nodes.push(g.node_at(prev));
        last = prev;
    }

    nodes.reverse();
    edges.reverse();
    Path { nodes, edges }
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find the shortest route between two nodes in the provided graph.
///
/// The cost of a route is the sum of its edge distances, in meters. Edges with
/// a [RoadType](crate::RoadType) not allowed by the `profile` are never considered.
///
/// Returns `Ok(None)` if the end node can't be reached from the start node,
/// which is an expected outcome (e.g. a plaza reachable only by footpaths while driving).
/// Returns [AStarError::InvalidReference] if either node doesn't exist.
pub fn find_route<'a>(
    g: &'a Graph,
    from_id: &str,
    to_id: &str,
    profile: Profile,
) -> Result<Option<Path<'a>>, AStarError> {
    let from = g
        .index_of(from_id)
        .ok_or_else(|| AStarError::InvalidReference(from_id.to_string()))?;
    let to = g
        .index_of(to_id)
        .ok_or_else(|| AStarError::InvalidReference(to_id.to_string()))?;
    let goal = g.node_at(to);

    // Every call owns its search state; the graph is only read.
    let mut open: Vec<usize> = vec![from];
    let mut came_from: HashMap<usize, (usize, &'a Edge)> = HashMap::default();
    let mut known_costs: Vec<f64> = vec![f64::INFINITY; g.len()];
    let mut scores: Vec<f64> = vec![f64::INFINITY; g.len()];

    known_costs[from] = 0.0;
    scores[from] = heuristic(g.node_at(from), goal);

    while let Some(pos) = select_best(&open, &scores) {
        let at = open.remove(pos);

        if at == to {
            let path = reconstruct_path(g, &came_from, to);
            log::debug!(
                "{} route {} -> {}: {} nodes, {} m",
                profile,
                from_id,
                to_id,
                path.nodes.len(),
                known_costs[to],
            );
            return Ok(Some(path));
        }

        log::trace!(
            "expanding {} (cost {}, score {})",
            g.node_at(at).id,
            known_costs[at],
            scores[at],
        );

        for edge in g.edges_at(at) {
            if !profile.allows(edge.road_type) {
                continue;
            }

            // The builder guarantees edge targets exist
            let Some(neighbor) = g.index_of(&edge.to) else {
                continue;
            };

            // Check if this is the cheapest way to the neighbor
            let neighbor_cost = known_costs[at] + edge.distance;
            if neighbor_cost >= known_costs[neighbor] {
                continue;
            }

            came_from.insert(neighbor, (at, edge));
            known_costs[neighbor] = neighbor_cost;
            scores[neighbor] = neighbor_cost + heuristic(g.node_at(neighbor), goal);
            if !open.contains(&neighbor) {
                open.push(neighbor);
            }
        }
    }

    log::debug!("no {} route {} -> {}", profile, from_id, to_id);
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphBuilder, RoadType};

    //  a ──100── b ──100── c ┄┄30┄┄ z
    //   ┄┄50┄┄ m ┄┄50┄┄┘
    //
    // ── road, ┄┄ footpath; all edges two-way except a -> c (one-way highway).
    fn fixture() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_node(Node::new("a", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("b", 0.0, 0.001)).unwrap();
        b.add_node(Node::new("c", 0.0, 0.002)).unwrap();
        b.add_node(Node::new("m", 0.0005, 0.001)).unwrap();
        b.add_node(Node::new("z", 0.0, 0.0025)).unwrap();
        b.add_two_way("a", "b", 100.0, "Main", RoadType::Road)
            .unwrap();
        b.add_two_way("b", "c", 100.0, "Main", RoadType::Road)
            .unwrap();
        b.add_two_way("a", "m", 50.0, "Garden", RoadType::Path)
            .unwrap();
        b.add_two_way("m", "c", 50.0, "Garden", RoadType::Path)
            .unwrap();
        b.add_two_way("c", "z", 30.0, "Pier", RoadType::Path)
            .unwrap();
        b.build()
    }

    fn ids(path: &Path) -> Vec<String> {
        path.nodes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn shortest_walk_uses_footpaths() {
        let g = fixture();
        let path = find_route(&g, "a", "c", Profile::Walking).unwrap().unwrap();
        assert_eq!(ids(&path), ["a", "m", "c"]);
        assert_eq!(path.edges.len(), 2);
        assert_eq!(path.distance(), 100.0);
    }

    #[test]
    fn cycling_uses_footpaths() {
        let g = fixture();
        let path = find_route(&g, "a", "c", Profile::Cycling).unwrap().unwrap();
        assert_eq!(ids(&path), ["a", "m", "c"]);
    }

    #[test]
    fn driving_avoids_footpaths() {
        let g = fixture();
        let path = find_route(&g, "a", "c", Profile::Driving).unwrap().unwrap();
        assert_eq!(ids(&path), ["a", "b", "c"]);
        assert_eq!(path.distance(), 200.0);
        assert!(path.edges.iter().all(|e| e.road_type != RoadType::Path));
    }

    #[test]
    fn footpath_island_is_unreachable_by_car() {
        let g = fixture();
        assert_eq!(find_route(&g, "a", "z", Profile::Driving), Ok(None));

        let path = find_route(&g, "a", "z", Profile::Walking).unwrap().unwrap();
        assert_eq!(ids(&path), ["a", "m", "c", "z"]);
        assert_eq!(path.distance(), 130.0);
    }

    #[test]
    fn one_way_edges() {
        let mut b = GraphBuilder::new();
        b.add_node(Node::new("a", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("b", 0.0, 0.001)).unwrap();
        b.add_edge(Edge::new("a", "b", 111.0, "Oneway", RoadType::Road))
            .unwrap();
        let g = b.build();

        assert!(find_route(&g, "a", "b", Profile::Driving).unwrap().is_some());
        assert_eq!(find_route(&g, "b", "a", Profile::Driving), Ok(None));
    }

    #[test]
    fn parallel_edges_use_the_cheaper_one() {
        let mut b = GraphBuilder::new();
        b.add_node(Node::new("a", 0.0, 0.0)).unwrap();
        b.add_node(Node::new("b", 0.0, 0.001)).unwrap();
        b.add_edge(Edge::new("a", "b", 150.0, "Long", RoadType::Road))
            .unwrap();
        b.add_edge(Edge::new("a", "b", 120.0, "Short", RoadType::Road))
            .unwrap();
        let g = b.build();

        let path = find_route(&g, "a", "b", Profile::Walking).unwrap().unwrap();
        assert_eq!(path.edges.len(), 1);
        assert_eq!(path.edges[0].street_name, "Short");
        assert_eq!(path.distance(), 120.0);
    }

    #[test]
    fn same_start_and_end() {
        let g = fixture();
        let path = find_route(&g, "b", "b", Profile::Driving).unwrap().unwrap();
        assert_eq!(ids(&path), ["b"]);
        assert!(path.edges.is_empty());
        assert_eq!(path.distance(), 0.0);
        assert!(path.distance().is_sign_positive());
    }

    #[test]
    fn invalid_reference() {
        let g = fixture();
        assert_eq!(
            find_route(&g, "a", "nowhere", Profile::Walking),
            Err(AStarError::InvalidReference("nowhere".to_string())),
        );
        assert_eq!(
            find_route(&g, "nowhere", "a", Profile::Walking),
            Err(AStarError::InvalidReference("nowhere".to_string())),
        );
    }

    #[test]
    fn deterministic() {
        let g = fixture();
        let first = find_route(&g, "z", "a", Profile::Walking).unwrap();
        let second = find_route(&g, "z", "a", Profile::Walking).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn select_best_prefers_earliest_on_ties() {
        let scores = [5.0, 3.0, 3.0, 4.0];
        assert_eq!(select_best(&[0, 2, 1, 3], &scores), Some(1));
        assert_eq!(select_best(&[3, 0], &scores), Some(0));
        assert_eq!(select_best(&[], &scores), None);
    }
}
