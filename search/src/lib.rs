//! Waypoint Search: an externally driven A* engine over opaque node ids.
//!
//! The engine never owns a graph. A driver pops the current node, asks its
//! own graph for the neighbors of that node, and feeds them back in:
//!
//! ```text
//! set_start / set_goal
//!   → while !is_done() { current_node() → (driver expands) → relax_neighbors() }
//!   → path() / path_cost() / explored_nodes()
//! ```
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_kernel     waypoint_search  ←  waypoint_harness
//! (canon, hashing)    (engine, frontier)   (driver, worlds, reports)
//! ```
//!
//! # Key types
//!
//! - [`AStarCore`](engine::AStarCore): the stepping engine
//! - [`OpenSet`](frontier::OpenSet): lazily pruned min-heap frontier
//! - [`NodeRecord`](node::NodeRecord): best-known cost, closed flag, back-pointer
//! - [`SearchPolicy`](policy::SearchPolicy): tie-break configuration
//! - [`SearchError`](error::SearchError): rejected relaxation input

#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod frontier;
pub mod legacy;
pub mod node;
pub mod policy;
