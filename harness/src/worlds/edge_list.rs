//! `EdgeListWorld`: an explicit directed graph with weighted edges.
//!
//! Neighbors come back in the order their edges were added. Heuristic values
//! are a per-node table toward the goal the world was built for; nodes
//! without an entry estimate 0.

use std::collections::BTreeMap;

use waypoint_search::node::NodeId;

use crate::contract::{Expansion, NeighborProvider};

/// Directed weighted graph given edge by edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeListWorld {
    world_id: String,
    edges: BTreeMap<NodeId, Vec<(NodeId, f64)>>,
    heuristic: BTreeMap<NodeId, f64>,
}

impl EdgeListWorld {
    #[must_use]
    pub fn new(world_id: impl Into<String>) -> Self {
        Self {
            world_id: world_id.into(),
            ..Self::default()
        }
    }

    /// Add a directed edge. Parallel edges are kept; the engine keeps the
    /// cheaper one.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, cost: f64) -> &mut Self {
        self.edges.entry(from).or_default().push((to, cost));
        self
    }

    /// Add the edge in both directions.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId, cost: f64) -> &mut Self {
        self.add_edge(a, b, cost);
        self.add_edge(b, a, cost)
    }

    /// Set the heuristic estimate of `node`.
    pub fn set_heuristic(&mut self, node: NodeId, estimate: f64) -> &mut Self {
        self.heuristic.insert(node, estimate);
        self
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Outgoing edges of `node` in insertion order.
    #[must_use]
    pub fn edges_from(&self, node: NodeId) -> &[(NodeId, f64)] {
        self.edges.get(&node).map_or(&[], Vec::as_slice)
    }
}

impl NeighborProvider for EdgeListWorld {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn expand(&self, node: NodeId, _goal: NodeId) -> Expansion {
        let mut expansion = Expansion::new();
        for &(to, cost) in self.edges_from(node) {
            let h = self.heuristic.get(&to).copied().unwrap_or(0.0);
            expansion.push(to, cost, h);
        }
        expansion
    }
}
