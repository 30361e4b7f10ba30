//! Neighbor provider contract: what a graph must offer the driver loop.
//!
//! Providers answer "what can I reach from this node, at what cost, and how
//! far is each neighbor from the goal". They do not touch the engine and do
//! not decide when to stop (runner concerns).

use waypoint_search::node::NodeId;

/// One node's outgoing moves, as three parallel vectors.
///
/// The layout matches [`AStarCore::relax_neighbors`](waypoint_search::engine::AStarCore::relax_neighbors)
/// so the runner can pass the vectors straight through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    pub neighbors: Vec<NodeId>,
    pub transition_costs: Vec<f64>,
    pub heuristic_costs: Vec<f64>,
}

impl Expansion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one move.
    pub fn push(&mut self, neighbor: NodeId, transition_cost: f64, heuristic_cost: f64) {
        self.neighbors.push(neighbor);
        self.transition_costs.push(transition_cost);
        self.heuristic_costs.push(heuristic_cost);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

/// The contract a graph must implement to be searched by the runner.
///
/// # Contract
///
/// - `expand` must be deterministic: same `(node, goal)` → same expansion in
///   the same order.
/// - Costs must be finite and non-negative. The engine rejects anything else
///   and the runner reports it as a provider contract violation.
pub trait NeighborProvider {
    /// Unique world identifier (e.g. `"grid:v1:8x8:four:manhattan"`).
    fn world_id(&self) -> &str;

    /// Outgoing moves of `node`, with heuristic estimates toward `goal`.
    fn expand(&self, node: NodeId, goal: NodeId) -> Expansion;
}
