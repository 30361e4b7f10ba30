//! Search policy types.

use crate::node::NodeId;

/// Engine configuration.
///
/// The engine has no budgets or deadlines; a driver that wants to stop early
/// simply stops calling it. The only knob is how equal-`f_cost` candidates
/// are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchPolicy {
    /// Secondary frontier ordering for equal `f_cost`.
    pub tie_break: TieBreak,
}

/// Secondary ordering applied when two frontier entries have equal `f_cost`.
///
/// Every variant falls back to insertion order, so the overall order is
/// always total and reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// First pushed, first popped.
    #[default]
    InsertionOrder,
    /// Smaller node id first.
    LowestNodeId,
    /// Larger `g_cost` first, i.e. the candidate that is further along.
    DeepestFirst,
}

impl TieBreak {
    /// The `tie` component of the frontier key for a candidate.
    ///
    /// For `DeepestFirst` the key relies on non-negative finite `g_cost`,
    /// whose IEEE bit pattern orders the same way as its value.
    #[must_use]
    pub fn tie_key(self, node: NodeId, g_cost: f64) -> u64 {
        match self {
            Self::InsertionOrder => 0,
            Self::LowestNodeId => u64::from(node),
            Self::DeepestFirst => u64::MAX - g_cost.to_bits(),
        }
    }

    /// Stable lowercase name, used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InsertionOrder => "insertion_order",
            Self::LowestNodeId => "lowest_node_id",
            Self::DeepestFirst => "deepest_first",
        }
    }
}
