//! Sentinel encodings for callers of the historical numeric bridge.
//!
//! The engine reports absence with `Option`. Older callers exchange flat
//! numeric arrays and expect `0` for "no node", `[0]` for "no path" or
//! "nothing explored", and NaN for "goal unreached". These helpers apply that
//! encoding at the boundary only; nothing inside the engine uses it.
//!
//! The encoding is lossy: a real node `0` and "none" look the same here.

use crate::engine::AStarCore;
use crate::node::NodeId;

/// The "no node" value of the numeric bridge.
pub const NO_NODE: NodeId = 0;

/// [`AStarCore::current_node`], with exhaustion encoded as [`NO_NODE`].
pub fn current_node_or_sentinel(astar: &mut AStarCore) -> NodeId {
    astar.current_node().unwrap_or(NO_NODE)
}

/// [`AStarCore::path`], with "no path" encoded as `[0]`.
#[must_use]
pub fn path_or_sentinel(astar: &AStarCore) -> Vec<NodeId> {
    astar.path().unwrap_or_else(|| vec![NO_NODE])
}

/// [`AStarCore::path_cost`], with "unreached" encoded as NaN.
#[must_use]
pub fn path_cost_or_nan(astar: &AStarCore) -> f64 {
    astar.path_cost().unwrap_or(f64::NAN)
}

/// [`AStarCore::explored_nodes`], with "nothing explored" encoded as `[0]`.
#[must_use]
pub fn explored_nodes_or_sentinel(astar: &AStarCore) -> Vec<NodeId> {
    let explored = astar.explored_nodes();
    if explored.is_empty() {
        vec![NO_NODE]
    } else {
        explored
    }
}

/// Length of [`path_or_sentinel`]; never 0, since the sentinel has one element.
#[must_use]
pub fn path_len_or_sentinel(astar: &AStarCore) -> usize {
    astar.path_len().max(1)
}

/// Length of [`explored_nodes_or_sentinel`]; never 0.
#[must_use]
pub fn explored_count_or_sentinel(astar: &AStarCore) -> usize {
    astar.explored_count().max(1)
}

/// Widen ids to `f64`, the element type the bridge exports id arrays in.
#[must_use]
pub fn to_real_vec(ids: &[NodeId]) -> Vec<f64> {
    ids.iter().map(|&id| f64::from(id)).collect()
}
