//! In-process determinism: repeated runs produce identical outcomes and
//! identical report bytes, for every tie-break policy.

use lock_tests::graphs::{diamond_world, MAZE_8X8, MAZE_GOAL, MAZE_START};
use waypoint_harness::heuristics::Heuristic;
use waypoint_harness::policy::RunPolicy;
use waypoint_harness::report::SearchReportV1;
use waypoint_harness::runner::run_search;
use waypoint_harness::worlds::grid::{Connectivity, GridWorld};
use waypoint_search::policy::{SearchPolicy, TieBreak};

fn policies() -> Vec<RunPolicy> {
    [
        TieBreak::InsertionOrder,
        TieBreak::LowestNodeId,
        TieBreak::DeepestFirst,
    ]
    .into_iter()
    .map(|tie_break| RunPolicy {
        search: SearchPolicy { tie_break },
        ..RunPolicy::default()
    })
    .collect()
}

#[test]
fn maze_report_bytes_identical_across_n10_runs() {
    let maze = GridWorld::from_ascii(MAZE_8X8, Connectivity::Eight, Heuristic::Octile).unwrap();
    for policy in policies() {
        let first = run_search(&maze, MAZE_START, MAZE_GOAL, &policy).unwrap();
        let first_bytes = SearchReportV1::from_outcome(&first, &policy)
            .canonical_bytes()
            .unwrap();
        for _ in 1..10 {
            let other = run_search(&maze, MAZE_START, MAZE_GOAL, &policy).unwrap();
            assert_eq!(first, other);
            let other_bytes = SearchReportV1::from_outcome(&other, &policy)
                .canonical_bytes()
                .unwrap();
            assert_eq!(first_bytes, other_bytes, "report bytes differ across runs");
        }
    }
}

#[test]
fn tie_break_changes_expansion_order_not_cost() {
    // Every monotone path on an open grid has the same f under Manhattan.
    let open = "
        .....
        .....
        .....
    ";
    let world = GridWorld::from_ascii(open, Connectivity::Four, Heuristic::Manhattan).unwrap();
    let outcomes: Vec<_> = policies()
        .iter()
        .map(|policy| run_search(&world, 0, 14, policy).unwrap())
        .collect();
    for outcome in &outcomes {
        assert_eq!(outcome.path_cost, Some(6.0));
    }
    // Insertion order goes 0, 1, 5; deepest-first goes 0, 1, 2.
    assert_eq!(outcomes[0].expansion_order[..3], [0, 1, 5]);
    assert_eq!(outcomes[2].expansion_order[..3], [0, 1, 2]);
}

#[test]
fn report_digest_differs_between_policies() {
    let world = diamond_world();
    let digests: Vec<_> = policies()
        .iter()
        .map(|policy| {
            let outcome = run_search(&world, 1, 4, policy).unwrap();
            SearchReportV1::from_outcome(&outcome, policy).digest().unwrap()
        })
        .collect();
    assert_ne!(digests[0], digests[1]);
    assert_ne!(digests[1], digests[2]);
}
