//! Reference worlds for the harness runner.

pub mod edge_list;
pub mod grid;
