//! Property tests over random non-negative graphs and random grids.
//!
//! Run with: cargo test -p lock-tests --test properties

use std::collections::{BTreeMap, BTreeSet};

use lock_tests::graphs::{drive, drive_observed, reference_dijkstra, world_from_edges, DriveEvent};
use proptest::prelude::*;
use waypoint_harness::heuristics::Heuristic;
use waypoint_harness::policy::RunPolicy;
use waypoint_harness::runner::run_search;
use waypoint_harness::worlds::edge_list::EdgeListWorld;
use waypoint_harness::worlds::grid::{Connectivity, GridWorld};
use waypoint_search::engine::AStarCore;
use waypoint_search::node::NodeId;
use waypoint_search::policy::{SearchPolicy, TieBreak};

// =============================================================================
// Strategies
// =============================================================================

/// Edge costs with plenty of zeros and integer ties.
fn arb_cost() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        2 => (1u32..5).prop_map(f64::from),
        2 => 0.0..10.0f64,
    ]
}

/// `(node_count, edges)`; start is node 0, goal is node `node_count - 1`.
fn arb_graph() -> impl Strategy<Value = (NodeId, Vec<(NodeId, NodeId, f64)>)> {
    (2u32..10).prop_flat_map(|n| {
        let edge = (0..n, 0..n, arb_cost());
        (Just(n), prop::collection::vec(edge, 0..30))
    })
}

/// ASCII map with the top-left and bottom-right cells forced free.
fn arb_grid() -> impl Strategy<Value = String> {
    (2usize..8, 2usize..8).prop_flat_map(|(w, h)| {
        let cell = prop_oneof![
            6 => Just('.'),
            2 => Just('#'),
            1 => (2u32..=9).prop_map(|d| char::from_digit(d, 10).unwrap_or('.')),
        ];
        prop::collection::vec(cell, w * h).prop_map(move |mut cells| {
            cells[0] = '.';
            cells[w * h - 1] = '.';
            cells
                .chunks(w)
                .map(|row| row.iter().collect::<String>())
                .collect::<Vec<_>>()
                .join("\n")
        })
    })
}

fn g_snapshot(astar: &AStarCore) -> BTreeMap<NodeId, f64> {
    astar
        .explored_nodes()
        .into_iter()
        .filter_map(|n| astar.g_cost(n).map(|g| (n, g)))
        .collect()
}

fn closed_set(astar: &AStarCore) -> BTreeSet<NodeId> {
    astar
        .explored_nodes()
        .into_iter()
        .filter(|&n| astar.in_closed_set(n))
        .collect()
}

fn edge_costs(world: &EdgeListWorld, from: NodeId, to: NodeId) -> Vec<f64> {
    world
        .edges_from(from)
        .iter()
        .filter(|(t, _)| *t == to)
        .map(|&(_, c)| c)
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn cost_matches_reference_dijkstra((n, edges) in arb_graph()) {
        let world = world_from_edges("random", &edges);
        let goal = n - 1;
        let astar = drive(&world, 0, goal);
        match reference_dijkstra(&world, 0, goal) {
            Some(expected) => {
                let cost = astar.path_cost();
                prop_assert!(astar.goal_reached());
                prop_assert!(cost.is_some_and(|c| (c - expected).abs() < 1e-9),
                    "cost {cost:?} != {expected}");
            }
            None => {
                prop_assert!(!astar.goal_reached());
                prop_assert_eq!(astar.path(), None);
                prop_assert_eq!(astar.path_cost(), None);
            }
        }
    }

    #[test]
    fn path_is_a_chain_of_recorded_parents((n, edges) in arb_graph()) {
        let world = world_from_edges("random", &edges);
        let goal = n - 1;
        let astar = drive(&world, 0, goal);
        if let Some(path) = astar.path() {
            prop_assert_eq!(path.first().copied(), Some(0));
            prop_assert_eq!(path.last().copied(), Some(goal));
            prop_assert_eq!(astar.path_len(), path.len());
            prop_assert_eq!(astar.parent(path[0]), None);
            for pair in path.windows(2) {
                let (prev, next) = (pair[0], pair[1]);
                prop_assert_eq!(astar.parent(next), Some(prev));
                let g_prev = astar.g_cost(prev).unwrap_or(f64::NAN);
                let g_next = astar.g_cost(next).unwrap_or(f64::NAN);
                prop_assert!(
                    edge_costs(&world, prev, next).iter().any(|c| g_prev + c == g_next),
                    "no edge {prev}->{next} explains g {g_prev} -> {g_next}"
                );
            }
        }
    }

    #[test]
    fn g_costs_never_increase((n, edges) in arb_graph()) {
        let world = world_from_edges("random", &edges);
        let mut previous: BTreeMap<NodeId, f64> = BTreeMap::new();
        let mut violations = Vec::new();
        drive_observed(&world, 0, n - 1, SearchPolicy::default(), |astar, event| {
            if let DriveEvent::Relaxed(_) = event {
                let now = g_snapshot(astar);
                for (node, before) in &previous {
                    match now.get(node) {
                        Some(after) if after <= before => {}
                        other => violations.push(format!("node {node}: {before} -> {other:?}")),
                    }
                }
                previous = now;
            }
        });
        prop_assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn closed_nodes_are_never_pushed_again((n, edges) in arb_graph()) {
        let world = world_from_edges("random", &edges);
        let mut popped = BTreeSet::new();
        let mut closed_before = BTreeSet::new();
        let mut pushes_before = 0;
        let mut violations = Vec::new();
        drive_observed(&world, 0, n - 1, SearchPolicy::default(), |astar, event| {
            match event {
                DriveEvent::Popped(node) => {
                    if !popped.insert(node) {
                        violations.push(format!("node {node} popped twice"));
                    }
                    closed_before = closed_set(astar);
                    pushes_before = astar.stats().frontier_pushes;
                }
                DriveEvent::Relaxed(expansion) => {
                    let open_targets = expansion
                        .neighbors
                        .iter()
                        .filter(|n| !closed_before.contains(*n))
                        .count() as u64;
                    let pushed = astar.stats().frontier_pushes - pushes_before;
                    if pushed > open_targets {
                        violations.push(format!("{pushed} pushes for {open_targets} open neighbors"));
                    }
                    if !closed_before.is_subset(&closed_set(astar)) {
                        violations.push("a closed node was reopened".to_string());
                    }
                }
            }
        });
        prop_assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn read_only_queries_are_idempotent((n, edges) in arb_graph()) {
        let world = world_from_edges("random", &edges);
        let astar = drive(&world, 0, n - 1);
        prop_assert!(astar.is_done());
        let first = (astar.path(), astar.path_cost(), astar.explored_nodes());
        let closed: Vec<bool> = (0..n).map(|node| astar.in_closed_set(node)).collect();
        for _ in 0..3 {
            prop_assert_eq!(&first, &(astar.path(), astar.path_cost(), astar.explored_nodes()));
            let again: Vec<bool> = (0..n).map(|node| astar.in_closed_set(node)).collect();
            prop_assert_eq!(&closed, &again);
        }
    }

    #[test]
    fn every_tie_break_finds_the_same_cost((n, edges) in arb_graph()) {
        let world = world_from_edges("random", &edges);
        let costs: Vec<Option<f64>> = [
            TieBreak::InsertionOrder,
            TieBreak::LowestNodeId,
            TieBreak::DeepestFirst,
        ]
        .into_iter()
        .map(|tie_break| {
            drive_observed(&world, 0, n - 1, SearchPolicy { tie_break }, |_, _| {}).path_cost()
        })
        .collect();
        for cost in &costs[1..] {
            let same = match (costs[0], *cost) {
                (Some(a), Some(b)) => (a - b).abs() < 1e-9,
                (None, None) => true,
                _ => false,
            };
            prop_assert!(same, "{costs:?}");
        }
    }

    #[test]
    fn admissible_grid_heuristic_keeps_optimal_cost(map in arb_grid()) {
        let blind = GridWorld::from_ascii(&map, Connectivity::Four, Heuristic::Zero).unwrap();
        let informed = GridWorld::from_ascii(&map, Connectivity::Four, Heuristic::Manhattan).unwrap();
        let goal = blind.width() * blind.height() - 1;
        let policy = RunPolicy::default();
        let a = run_search(&blind, 0, goal, &policy).unwrap();
        let b = run_search(&informed, 0, goal, &policy).unwrap();
        prop_assert_eq!(a.is_goal_reached(), b.is_goal_reached());
        if let (Some(x), Some(y)) = (a.path_cost, b.path_cost) {
            prop_assert!((x - y).abs() < 1e-9, "{x} != {y}");
        }
    }
}
