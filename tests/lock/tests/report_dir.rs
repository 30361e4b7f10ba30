//! Report directory persistence: write, read back, and fail closed on
//! tampering.

use lock_tests::graphs::{MAZE_8X8, MAZE_GOAL, MAZE_START};
use waypoint_harness::heuristics::Heuristic;
use waypoint_harness::policy::RunPolicy;
use waypoint_harness::report::{read_report_digest, write_report_dir, ReportDirError, SearchReportV1};
use waypoint_harness::runner::run_search;
use waypoint_harness::worlds::grid::{Connectivity, GridWorld};

fn maze_report() -> SearchReportV1 {
    let maze = GridWorld::from_ascii(MAZE_8X8, Connectivity::Four, Heuristic::Manhattan).unwrap();
    let policy = RunPolicy::default();
    let outcome = run_search(&maze, MAZE_START, MAZE_GOAL, &policy).unwrap();
    SearchReportV1::from_outcome(&outcome, &policy)
}

#[test]
fn written_report_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let report = maze_report();
    let written = write_report_dir(dir.path(), &report).unwrap();
    assert_eq!(read_report_digest(dir.path()).unwrap(), written);

    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("search_report.json")).unwrap())
            .unwrap();
    assert_eq!(on_disk, report.to_json_value());
}

#[test]
fn nested_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("runs").join("maze");
    write_report_dir(&nested, &maze_report()).unwrap();
    assert!(nested.join("report_digest.txt").exists());
}

#[test]
fn edited_report_fails_digest_check() {
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(dir.path(), &maze_report()).unwrap();

    // Rewrite the report canonically but with a different cost.
    let path = dir.path().join("search_report.json");
    let mut value: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    value["path_cost"] = serde_json::Value::String("0".into());
    let bytes = waypoint_kernel::proof::canon::canonical_json_bytes(&value).unwrap();
    std::fs::write(&path, bytes).unwrap();

    let err = read_report_digest(dir.path()).unwrap_err();
    assert!(matches!(err, ReportDirError::DigestMismatch { .. }), "{err}");
}

#[test]
fn missing_report_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_report_digest(dir.path()).unwrap_err();
    assert!(
        matches!(err, ReportDirError::MissingFile { filename: "search_report.json" }),
        "{err}"
    );
}
