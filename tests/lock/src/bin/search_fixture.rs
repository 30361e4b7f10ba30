//! Binary that runs the lock fixtures through `run_search` and prints
//! deterministic `key=value` lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! One block per fixture, each line prefixed with the fixture name. Log
//! output (`WAYPOINT_LOG`) goes to stderr.

use lock_tests::graphs::{diamond_world, MAZE_8X8, MAZE_GOAL, MAZE_START};
use waypoint_harness::contract::NeighborProvider;
use waypoint_harness::heuristics::Heuristic;
use waypoint_harness::logging::{init_logging, LoggingConfig};
use waypoint_harness::policy::RunPolicy;
use waypoint_harness::report::SearchReportV1;
use waypoint_harness::runner::run_search;
use waypoint_harness::worlds::grid::{Connectivity, GridWorld};
use waypoint_kernel::proof::canon::canonical_cost;
use waypoint_search::node::NodeId;
use waypoint_search::policy::{SearchPolicy, TieBreak};

fn emit(name: &str, world: &dyn NeighborProvider, start: NodeId, goal: NodeId, policy: &RunPolicy) {
    let outcome = run_search(world, start, goal, policy).expect("policy is valid");
    let report = SearchReportV1::from_outcome(&outcome, policy);
    let digest = report.digest().expect("report canonicalizes");
    let path = outcome.path.as_ref().map_or_else(
        || "none".to_string(),
        |p| p.iter().map(ToString::to_string).collect::<Vec<_>>().join(","),
    );
    let cost = outcome
        .path_cost
        .map_or_else(|| "none".to_string(), canonical_cost);

    println!("{name}.world_id={}", outcome.world_id);
    println!("{name}.termination={}", outcome.termination.as_str());
    println!("{name}.path={path}");
    println!("{name}.path_cost={cost}");
    println!("{name}.explored_count={}", outcome.explored.len());
    println!("{name}.expansions={}", outcome.stats.expansions);
    println!(
        "{name}.policy_digest={}",
        policy.digest().expect("policy canonicalizes")
    );
    println!("{name}.report_digest={digest}");
}

fn main() {
    // Events go to stderr, so WAYPOINT_LOG never changes stdout.
    init_logging(&LoggingConfig::default()).expect("logging initializes");

    let default_policy = RunPolicy::default();

    emit("diamond", &diamond_world(), 1, 4, &default_policy);

    for (name, connectivity, heuristic) in [
        ("maze_four", Connectivity::Four, Heuristic::Manhattan),
        ("maze_eight", Connectivity::Eight, Heuristic::Octile),
    ] {
        let maze = GridWorld::from_ascii(MAZE_8X8, connectivity, heuristic).expect("maze parses");
        println!(
            "{name}.fixture_digest={}",
            maze.fixture_digest().expect("fixture canonicalizes")
        );
        emit(name, &maze, MAZE_START, MAZE_GOAL, &default_policy);
    }

    let lowest_id = RunPolicy {
        search: SearchPolicy {
            tie_break: TieBreak::LowestNodeId,
        },
        ..RunPolicy::default()
    };
    let maze = GridWorld::from_ascii(MAZE_8X8, Connectivity::Four, Heuristic::Zero)
        .expect("maze parses");
    emit("maze_lowest_id", &maze, MAZE_START, MAZE_GOAL, &lowest_id);
}
