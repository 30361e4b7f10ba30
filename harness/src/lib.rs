//! Waypoint Harness: drives the search engine against concrete graphs.
//!
//! The engine is graph-agnostic; the harness supplies everything around it:
//! a [`NeighborProvider`](contract::NeighborProvider) contract, the driver
//! loop ([`runner::run_search`]), reference worlds, heuristics, run budgets,
//! canonical search reports and logging setup.
//!
//! Worlds provide neighbors and costs only; the runner owns the loop.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod heuristics;
pub mod logging;
pub mod policy;
pub mod report;
pub mod runner;
pub mod worlds;
