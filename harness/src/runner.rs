//! Harness runner: the driver loop around [`AStarCore`].
//!
//! # Loop
//!
//! ```text
//! validate policy → set_goal / set_start
//!   → while !is_done() {
//!         budget check → current_node() → provider.expand() → relax_neighbors()
//!     }
//!   → path / path_cost / explored_nodes → SearchOutcome
//! ```
//!
//! Every runtime stop (goal, exhaustion, budget, misbehaving provider) is an
//! `Ok(SearchOutcome)` with whatever the engine had settled so far. Only
//! pre-flight failures are `Err`.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, info, warn};

use waypoint_search::engine::{AStarCore, SearchStats};
use waypoint_search::error::{InvalidInputReason, SearchError};
use waypoint_search::node::NodeId;

use crate::contract::NeighborProvider;
use crate::policy::{PolicyError, RunPolicy};

/// Why the driver loop stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminationReason {
    /// The goal was popped as current.
    GoalReached,
    /// The frontier ran out before the goal was popped.
    FrontierExhausted,
    /// `max_expansions` nodes were popped without reaching the goal.
    ExpansionBudgetExceeded,
    /// `NeighborProvider::expand` panicked while expanding `node`.
    ProviderPanicked { node: NodeId },
    /// The engine rejected the expansion of `node`.
    ProviderContractViolation {
        node: NodeId,
        reason: InvalidInputReason,
    },
}

impl TerminationReason {
    /// Stable lowercase name, used in reports and fixtures.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::ProviderPanicked { .. } => "provider_panicked",
            Self::ProviderContractViolation { .. } => "provider_contract_violation",
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub world_id: String,
    pub start: NodeId,
    pub goal: NodeId,
    pub termination: TerminationReason,
    /// Start-to-goal path, present only when the goal was reached.
    pub path: Option<Vec<NodeId>>,
    /// Best known cost to the goal (may be present even without a path
    /// when the run stopped early with the goal already relaxed).
    pub path_cost: Option<f64>,
    /// Every node with a record, ascending.
    pub explored: Vec<NodeId>,
    /// Nodes in the order they were popped as current.
    pub expansion_order: Vec<NodeId>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Returns `true` if the run stopped because the goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.termination == TerminationReason::GoalReached
    }
}

/// Pre-flight failure of a run. No search step was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    InvalidPolicy(PolicyError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy(e) => write!(f, "invalid run policy: {e}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<PolicyError> for RunError {
    fn from(e: PolicyError) -> Self {
        Self::InvalidPolicy(e)
    }
}

/// Search `provider` from `start` to `goal` under `policy`.
///
/// # Errors
///
/// Returns [`RunError::InvalidPolicy`] if the policy fails validation.
pub fn run_search(
    provider: &dyn NeighborProvider,
    start: NodeId,
    goal: NodeId,
    policy: &RunPolicy,
) -> Result<SearchOutcome, RunError> {
    policy.validate()?;

    let mut astar = AStarCore::with_policy(policy.search);
    astar.set_goal(goal);
    astar.set_start(start);
    info!(
        world_id = provider.world_id(),
        start,
        goal,
        max_expansions = policy.max_expansions,
        "search run started"
    );

    let mut expansion_order: Vec<NodeId> = Vec::new();
    let termination = loop {
        if astar.is_done() {
            break if astar.goal_reached() {
                TerminationReason::GoalReached
            } else {
                TerminationReason::FrontierExhausted
            };
        }
        if expansion_order.len() as u64 >= policy.max_expansions {
            break TerminationReason::ExpansionBudgetExceeded;
        }

        let Some(node) = astar.current_node() else {
            // Only stale entries were left.
            break TerminationReason::FrontierExhausted;
        };
        expansion_order.push(node);
        if astar.goal_reached() {
            break TerminationReason::GoalReached;
        }

        let Ok(expansion) = catch_unwind(AssertUnwindSafe(|| provider.expand(node, goal))) else {
            warn!(node, "neighbor provider panicked");
            break TerminationReason::ProviderPanicked { node };
        };

        match astar.relax_neighbors(
            &expansion.neighbors,
            &expansion.transition_costs,
            &expansion.heuristic_costs,
        ) {
            Ok(()) => {}
            Err(SearchError::InvalidInput { reason }) => {
                warn!(node, %reason, "neighbor provider violated the cost contract");
                break TerminationReason::ProviderContractViolation { node, reason };
            }
            Err(SearchError::NoCurrentNode) => {
                // current_node() just returned Some, so this cannot happen.
                break TerminationReason::FrontierExhausted;
            }
        }
    };

    let outcome = SearchOutcome {
        world_id: provider.world_id().to_string(),
        start,
        goal,
        path: astar.path(),
        path_cost: astar.path_cost(),
        explored: astar.explored_nodes(),
        expansion_order,
        stats: astar.stats(),
        termination,
    };
    debug!(
        termination = outcome.termination.as_str(),
        expansions = outcome.stats.expansions,
        explored = outcome.explored.len(),
        "search run finished"
    );
    Ok(outcome)
}
