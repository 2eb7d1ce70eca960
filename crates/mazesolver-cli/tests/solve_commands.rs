use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture maze present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("mazesolver");
    cmd.env("NO_COLOR", "1")
        .env("RUST_LOG", "error")
        .env_remove("MAZESOLVER_TIMEOUT_SECS")
        .arg("--no-logo");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run mazesolver");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn solve_reports_algorithm_in_text_output() {
    let mut cmd = cli();
    cmd.arg("solve")
        .arg(fixture_path("gap_column.txt"))
        .arg("--algorithm")
        .arg("bfs");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("algorithm: bfs"))
        .stdout(predicate::str::contains("Path from (0, 0) to (4, 4) (8 moves"))
        .stdout(predicate::str::contains("Nodes explored:"));
}

#[test]
fn basic_format_outputs_minimal_path() {
    let mut cmd = cli();
    cmd.arg("--format")
        .arg("basic")
        .arg("solve")
        .arg(fixture_path("gap_column.txt"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("+ (0, 0)"))
        .stdout(predicate::str::contains("- (4, 4)"))
        .stdout(predicate::str::contains("via astar"));
}

#[test]
fn json_format_is_machine_readable() {
    let mut cmd = cli();
    cmd.arg("--format")
        .arg("json")
        .arg("solve")
        .arg(fixture_path("gap_column.txt"))
        .arg("--algorithm")
        .arg("dijkstra");

    let json = json_stdout(&mut cmd);
    assert_eq!(json["algorithm"], "dijkstra");
    assert_eq!(json["status"], "succeeded");
    assert_eq!(json["steps"].as_array().map(Vec::len), Some(9));
    assert_eq!(json["statistics"]["path_length"], 9);
    assert_eq!(json["goal"]["row"], 4);
}

#[test]
fn unknown_algorithm_error_is_friendly() {
    let mut cmd = cli();
    cmd.arg("solve")
        .arg(fixture_path("gap_column.txt"))
        .arg("--algorithm")
        .arg("dijkstar");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown algorithm 'dijkstar'"))
        .stderr(predicate::str::contains("Did you mean"))
        .stderr(predicate::str::contains("'dijkstra'"));
}

#[test]
fn algorithm_aliases_are_accepted() {
    let mut cmd = cli();
    cmd.arg("solve")
        .arg(fixture_path("gap_column.txt"))
        .arg("--algorithm")
        .arg("a-star");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("algorithm: astar"));
}

#[test]
fn walled_off_maze_exits_with_no_path_status() {
    let mut cmd = cli();
    cmd.arg("solve").arg(fixture_path("walled_off.txt"));

    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("no path exists"))
        .stderr(predicate::str::contains("walled off"));
}

#[test]
fn zero_budget_from_environment_times_out() {
    let mut cmd = cli();
    cmd.env("MAZESOLVER_TIMEOUT_SECS", "0")
        .arg("solve")
        .arg(fixture_path("serpentine_40.txt"));

    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("search timed out"))
        .stderr(predicate::str::contains("--timeout"));
}

#[test]
fn no_timeout_flag_overrides_environment() {
    let mut cmd = cli();
    cmd.env("MAZESOLVER_TIMEOUT_SECS", "0")
        .arg("solve")
        .arg(fixture_path("gap_column.txt"))
        .arg("--no-timeout");

    cmd.assert().success();
}

#[test]
fn show_maze_overlays_path() {
    let mut cmd = cli();
    cmd.arg("solve")
        .arg(fixture_path("gap_column.txt"))
        .arg("--show-maze");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("*"))
        .stdout(predicate::str::contains("S"))
        .stdout(predicate::str::contains("G"));
}

#[test]
fn goal_override_at_start_yields_single_step_path() {
    let mut cmd = cli();
    cmd.arg("--format")
        .arg("json")
        .arg("solve")
        .arg(fixture_path("gap_column.txt"))
        .arg("--goal")
        .arg("0,0");

    let json = json_stdout(&mut cmd);
    assert_eq!(json["statistics"]["path_length"], 1);
    assert_eq!(json["statistics"]["nodes_explored"], 1);
}

#[test]
fn goal_override_rejects_walls() {
    let mut cmd = cli();
    cmd.arg("solve")
        .arg(fixture_path("gap_column.txt"))
        .arg("--goal")
        .arg("0,2");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid maze"));
}

#[test]
fn missing_maze_file_suggests_generate() {
    let temp = tempdir().expect("create temp dir");
    let missing = temp.path().join("nope.txt");

    let mut cmd = cli();
    cmd.arg("solve").arg(&missing);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Maze file not found"))
        .stderr(predicate::str::contains("mazesolver generate --output"));
}

#[test]
fn bracketed_rows_are_accepted() {
    let mut cmd = cli();
    cmd.arg("--format")
        .arg("basic")
        .arg("solve")
        .arg(fixture_path("bracketed.txt"))
        .arg("--algorithm")
        .arg("bfs");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("- (3, 3)"));
}
