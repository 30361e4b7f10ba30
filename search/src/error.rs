//! Typed search errors.
//!
//! The engine reports "nothing to pop", "no path" and "goal unreached" with
//! `Option`. `SearchError` is reserved for calls the engine refuses: a
//! rejected call leaves every piece of engine state untouched.

/// Which per-neighbor cost array a rejected value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostField {
    Transition,
    Heuristic,
}

impl std::fmt::Display for CostField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transition => f.write_str("transition cost"),
            Self::Heuristic => f.write_str("heuristic cost"),
        }
    }
}

/// Why a `relax_neighbors` input was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInputReason {
    /// The three parallel sequences differ in length.
    LengthMismatch {
        neighbors: usize,
        transition_costs: usize,
        heuristic_costs: usize,
    },
    /// A cost is NaN or infinite.
    NonFiniteCost {
        field: CostField,
        index: usize,
        value: f64,
    },
    /// A cost is below zero. Negative edge weights are not supported.
    NegativeCost {
        field: CostField,
        index: usize,
        value: f64,
    },
}

impl std::fmt::Display for InvalidInputReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch {
                neighbors,
                transition_costs,
                heuristic_costs,
            } => write!(
                f,
                "length mismatch: {neighbors} neighbors, {transition_costs} transition costs, \
                 {heuristic_costs} heuristic costs"
            ),
            Self::NonFiniteCost {
                field,
                index,
                value,
            } => write!(f, "{field} at index {index} is not finite: {value}"),
            Self::NegativeCost {
                field,
                index,
                value,
            } => write!(f, "{field} at index {index} is negative: {value}"),
        }
    }
}

/// Typed failure for engine calls.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Neighbor expansion input is malformed.
    InvalidInput { reason: InvalidInputReason },
    /// `relax_neighbors` was called before any node was popped as current.
    NoCurrentNode,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
            Self::NoCurrentNode => f.write_str("no current node: call current_node() first"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<InvalidInputReason> for SearchError {
    fn from(reason: InvalidInputReason) -> Self {
        Self::InvalidInput { reason }
    }
}
