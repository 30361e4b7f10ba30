//! The stepping A* engine.
//!
//! [`AStarCore`] owns the record table and the open set for one search. It
//! never sees the graph: the driver pops a node with
//! [`AStarCore::current_node`], looks up that node's neighbors itself, and
//! hands them to [`AStarCore::relax_neighbors`].
//!
//! # Invariants
//!
//! - At most one [`NodeRecord`] per node; a record's `g_cost` only ever
//!   decreases, and only by a strictly smaller tentative cost.
//! - A closed node is never pushed onto the open set again.
//! - Back-pointers form a tree rooted at the start node (non-negative costs
//!   plus the strict `<` comparison rule out cycles).

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::error::{CostField, InvalidInputReason, SearchError};
use crate::frontier::OpenSet;
use crate::node::{NodeId, NodeRecord};
use crate::policy::SearchPolicy;

/// Coarse lifecycle of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Start pushed, nothing popped yet.
    Ready,
    /// At least one node popped, frontier non-empty, goal not reached.
    Expanding,
    /// Frontier exhausted or goal reached. Results are final.
    Done,
}

/// Counters for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped as current (stale pops excluded).
    pub expansions: u64,
    /// Frontier entries discarded because their node was already closed.
    pub stale_pops: u64,
    /// Record insertions or cost improvements made by `relax_neighbors`.
    pub relaxations: u64,
    /// Entries pushed onto the frontier, start included.
    pub frontier_pushes: u64,
    /// Largest frontier size observed.
    pub frontier_high_water: u64,
}

/// Externally driven A* search over opaque node ids.
///
/// ```
/// use waypoint_search::engine::AStarCore;
///
/// // Line graph 1 -> 2 -> 3, unit costs, zero heuristic.
/// let mut astar = AStarCore::new();
/// astar.set_start(1);
/// astar.set_goal(3);
/// while !astar.is_done() {
///     let Some(node) = astar.current_node() else { break };
///     let next: Vec<u32> = if node < 3 { vec![node + 1] } else { Vec::new() };
///     let costs = vec![1.0; next.len()];
///     let heuristics = vec![0.0; next.len()];
///     astar.relax_neighbors(&next, &costs, &heuristics).unwrap();
/// }
/// assert_eq!(astar.path(), Some(vec![1, 2, 3]));
/// assert_eq!(astar.path_cost(), Some(2.0));
/// ```
#[derive(Debug, Default)]
pub struct AStarCore {
    policy: SearchPolicy,
    start: Option<NodeId>,
    goal: Option<NodeId>,
    current: Option<NodeId>,
    goal_reached: bool,
    records: BTreeMap<NodeId, NodeRecord>,
    open: OpenSet,
    stats: SearchStats,
}

impl AStarCore {
    /// Create an engine with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with an explicit policy.
    #[must_use]
    pub fn with_policy(policy: SearchPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    // -----------------------------------------------------------------------
    // Initialization
    // -----------------------------------------------------------------------

    /// Begin a fresh search from `start`.
    ///
    /// Discards every record, frontier entry and counter from any previous
    /// search. The goal is kept, so `set_goal` may be called before or after.
    pub fn set_start(&mut self, start: NodeId) {
        self.records.clear();
        self.open.clear();
        self.current = None;
        self.goal_reached = false;
        self.stats = SearchStats::default();

        self.start = Some(start);
        self.records.insert(start, NodeRecord::start());
        self.push_open(start, 0.0, 0.0);
        debug!(start, "search started");
    }

    /// Set the goal node. No reachability check is made.
    ///
    /// Moving the goal after it was reached resumes the search: the reached
    /// flag holds only while the current node is the goal, so later pops
    /// continue until the new goal comes off the frontier.
    pub fn set_goal(&mut self, goal: NodeId) {
        self.goal = Some(goal);
        self.goal_reached = self.current == Some(goal);
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Pop the best open candidate, close it and make it current.
    ///
    /// Stale entries (nodes closed since they were pushed) are skipped until a
    /// live entry is found. Returns `None` when the frontier runs out, or when
    /// the goal has already been reached; `current` is left unchanged then.
    pub fn current_node(&mut self) -> Option<NodeId> {
        if self.goal_reached {
            return None;
        }
        loop {
            let (key, node) = self.open.pop()?;
            if self.in_closed_set(node) {
                self.stats.stale_pops += 1;
                trace!(node, f_cost = key.f_cost, "skipped stale frontier entry");
                continue;
            }

            self.current = Some(node);
            if self.goal == Some(node) {
                self.goal_reached = true;
            }
            if let Some(record) = self.records.get_mut(&node) {
                record.closed = true;
            } else {
                // Every pushed node has a record; keep going with an unknown cost.
                warn!(node, "popped node has no record");
                self.records.insert(
                    node,
                    NodeRecord {
                        g_cost: f64::INFINITY,
                        closed: true,
                        parent: None,
                    },
                );
            }
            self.stats.expansions += 1;
            debug!(
                node,
                f_cost = key.f_cost,
                goal_reached = self.goal_reached,
                "node expanded"
            );
            return Some(node);
        }
    }

    /// Relax the neighbors of the current node.
    ///
    /// `transition_costs[i]` is the cost of moving from the current node to
    /// `neighbors[i]`; `heuristic_costs[i]` is the estimated remaining cost
    /// from `neighbors[i]` to the goal. A neighbor's record is replaced only
    /// when it has none or the new cost is strictly smaller. Closed neighbors
    /// may have their record improved but are never pushed again.
    ///
    /// Returns immediately, changing nothing, once the goal has been reached.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NoCurrentNode`] if no node has been popped yet.
    /// - [`SearchError::InvalidInput`] if the three slices differ in length or
    ///   any cost is negative, NaN or infinite. Nothing is modified.
    pub fn relax_neighbors(
        &mut self,
        neighbors: &[NodeId],
        transition_costs: &[f64],
        heuristic_costs: &[f64],
    ) -> Result<(), SearchError> {
        if self.goal_reached {
            return Ok(());
        }
        let current = self.current.ok_or(SearchError::NoCurrentNode)?;
        validate_expansion(neighbors, transition_costs, heuristic_costs)?;

        let g_current = self
            .records
            .get(&current)
            .map_or(f64::INFINITY, |r| r.g_cost);

        for ((&neighbor, &transition), &heuristic) in neighbors
            .iter()
            .zip(transition_costs)
            .zip(heuristic_costs)
        {
            let tentative = g_current + transition;
            let improves = match self.records.get(&neighbor) {
                Some(prior) => tentative < prior.g_cost,
                None => true,
            };
            if !improves {
                continue;
            }

            let closed = self.in_closed_set(neighbor);
            self.records
                .insert(neighbor, NodeRecord::reached(tentative, current, closed));
            self.stats.relaxations += 1;

            let f_cost = tentative + heuristic;
            trace!(
                node = neighbor,
                parent = current,
                g_cost = tentative,
                f_cost,
                closed,
                "relaxed"
            );
            if !closed {
                self.push_open(neighbor, tentative, f_cost);
            }
        }
        Ok(())
    }

    /// Whether `node` has been popped as current. `false` for unknown nodes.
    #[must_use]
    pub fn in_closed_set(&self, node: NodeId) -> bool {
        self.records.get(&node).is_some_and(|r| r.closed)
    }

    /// Stop condition: the frontier is empty or the goal has been reached.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.open.is_empty() || self.goal_reached
    }

    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        if self.is_done() {
            SearchPhase::Done
        } else if self.current.is_none() {
            SearchPhase::Ready
        } else {
            SearchPhase::Expanding
        }
    }

    // -----------------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------------

    /// The path from start to goal, or `None` if the goal was not reached.
    ///
    /// The first element is the start, the last is the goal, and every
    /// element is the recorded parent of the one after it.
    #[must_use]
    pub fn path(&self) -> Option<Vec<NodeId>> {
        let start = self.start?;
        let goal = self.goal?;
        if !self.goal_reached || self.current != Some(goal) {
            return None;
        }

        let mut path = vec![goal];
        let mut node = goal;
        while node != start {
            node = self.records.get(&node)?.parent?;
            path.push(node);
            if path.len() > self.records.len() {
                warn!(goal, "back-pointer chain does not reach the start");
                return None;
            }
        }
        path.reverse();
        Some(path)
    }

    /// Best known cost to the goal, or `None` if the goal was never relaxed.
    #[must_use]
    pub fn path_cost(&self) -> Option<f64> {
        self.goal.and_then(|goal| self.g_cost(goal))
    }

    /// Every node that has a record, in ascending id order.
    #[must_use]
    pub fn explored_nodes(&self) -> Vec<NodeId> {
        self.records.keys().copied().collect()
    }

    /// Number of nodes on [`AStarCore::path`], 0 when there is none.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.path().map_or(0, |p| p.len())
    }

    /// Number of nodes [`AStarCore::explored_nodes`] would return.
    #[must_use]
    pub fn explored_count(&self) -> usize {
        self.records.len()
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> Option<NodeId> {
        self.goal
    }

    /// The node most recently returned by [`AStarCore::current_node`].
    #[must_use]
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    #[must_use]
    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    #[must_use]
    pub fn record(&self, node: NodeId) -> Option<&NodeRecord> {
        self.records.get(&node)
    }

    #[must_use]
    pub fn g_cost(&self, node: NodeId) -> Option<f64> {
        self.records.get(&node).map(|r| r.g_cost)
    }

    /// Recorded back-pointer of `node` (`None` for the start and unknown nodes).
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.records.get(&node).and_then(|r| r.parent)
    }

    /// Frontier size, stale entries included.
    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.open.len()
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            frontier_high_water: self.open.high_water(),
            ..self.stats
        }
    }

    fn push_open(&mut self, node: NodeId, g_cost: f64, f_cost: f64) {
        let tie = self.policy.tie_break.tie_key(node, g_cost);
        self.open.push(f_cost, tie, node);
        self.stats.frontier_pushes += 1;
    }
}

fn validate_expansion(
    neighbors: &[NodeId],
    transition_costs: &[f64],
    heuristic_costs: &[f64],
) -> Result<(), InvalidInputReason> {
    if transition_costs.len() != neighbors.len() || heuristic_costs.len() != neighbors.len() {
        return Err(InvalidInputReason::LengthMismatch {
            neighbors: neighbors.len(),
            transition_costs: transition_costs.len(),
            heuristic_costs: heuristic_costs.len(),
        });
    }
    for (field, costs) in [
        (CostField::Transition, transition_costs),
        (CostField::Heuristic, heuristic_costs),
    ] {
        for (index, &value) in costs.iter().enumerate() {
            if !value.is_finite() {
                return Err(InvalidInputReason::NonFiniteCost {
                    field,
                    index,
                    value,
                });
            }
            if value < 0.0 {
                return Err(InvalidInputReason::NegativeCost {
                    field,
                    index,
                    value,
                });
            }
        }
    }
    Ok(())
}
