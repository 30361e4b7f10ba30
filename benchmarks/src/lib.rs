//! Shared helpers for waypoint benchmark suites.

use waypoint_harness::heuristics::Heuristic;
use waypoint_harness::worlds::grid::{Connectivity, GridWorld};
use waypoint_search::node::NodeId;

/// Open `size x size` grid with a vertical wall in the middle column, open at
/// the bottom row, so searches have to detour.
#[must_use]
pub fn walled_map(size: usize) -> String {
    let wall = size / 2;
    let mut rows = Vec::with_capacity(size);
    for y in 0..size {
        let row: String = (0..size)
            .map(|x| if x == wall && y + 1 < size { '#' } else { '.' })
            .collect();
        rows.push(row);
    }
    rows.join("\n")
}

/// Parsed [`walled_map`] plus the top-left start and top-right goal.
///
/// # Panics
///
/// Panics if the generated map does not parse. Benchmark setup failures are
/// fatal.
#[must_use]
pub fn walled_grid(
    size: usize,
    connectivity: Connectivity,
    heuristic: Heuristic,
) -> (GridWorld, NodeId, NodeId) {
    let world = GridWorld::from_ascii(&walled_map(size), connectivity, heuristic)
        .expect("generated map parses");
    let start = world.node_id((0, 0)).expect("start inside grid");
    let goal = world
        .node_id((world.width() - 1, 0))
        .expect("goal inside grid");
    (world, start, goal)
}
