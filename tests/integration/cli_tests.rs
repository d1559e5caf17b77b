//! Integration tests for the CLI binary.
//!
//! Runs the `fairdraw` binary against a temporary participant file.
//!
//! This test is registered as a [[test]] in the fairdraw-cli crate
//! so that CARGO_BIN_EXE_fairdraw is available.

use std::path::Path;
use std::process::{Command, Output};

/// Get a Command pointing to the `fairdraw` binary.
fn fairdraw_binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fairdraw"));
    cmd.env_remove("FAIRDRAW_FILE");
    cmd
}

fn run(file: &Path, args: &[&str]) -> Output {
    fairdraw_binary()
        .arg("--file")
        .arg(file)
        .args(args)
        .output()
        .expect("failed to execute fairdraw")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn read_records(file: &Path) -> Vec<serde_json::Value> {
    let text = std::fs::read_to_string(file).expect("participant file should exist");
    serde_json::from_str(&text).expect("participant file should be a JSON array")
}

fn effective_frequency(record: &serde_json::Value) -> i64 {
    record["dates"].as_array().unwrap().len() as i64 + record["balanceamento"].as_i64().unwrap()
}

#[test]
fn cli_responds_to_help() {
    let output = fairdraw_binary()
        .arg("--help")
        .output()
        .expect("failed to execute fairdraw --help");

    assert!(
        output.status.success(),
        "fairdraw --help should exit with success, stderr: {}",
        stderr(&output)
    );

    let out = stdout(&output);
    assert!(
        out.contains("fairdraw") || out.contains("Usage"),
        "fairdraw --help output should contain usage information, got: {out}"
    );
}

#[test]
fn cli_responds_to_version() {
    let output = fairdraw_binary()
        .arg("--version")
        .output()
        .expect("failed to execute fairdraw --version");

    assert!(output.status.success());
    assert!(stdout(&output).contains("0.3"));
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = fairdraw_binary()
        .arg("--nonexistent-flag")
        .output()
        .expect("failed to execute fairdraw");

    assert!(
        !output.status.success(),
        "fairdraw with unknown flag should exit with error"
    );
}

#[test]
fn cli_add_list_and_saved_draw() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("frequencies.json");

    assert!(run(&file, &["add", "--name", "Aline", "--offset", "2"]).status.success());
    assert!(run(&file, &["add", "--name", "Pina", "--alias", "Yoga", "--offset", "1"])
        .status
        .success());

    let records = read_records(&file);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[1]["id"], 2);
    assert_eq!(records[1]["alias"], "Yoga");

    let list = run(&file, &["list"]);
    assert!(list.status.success());
    assert!(stdout(&list).contains("Pina - Yoga"));

    let draw = run(&file, &["draw", "--seed", "9", "--no-suspense", "--save"]);
    assert!(draw.status.success(), "draw failed: {}", stderr(&draw));
    let out = stdout(&draw);
    assert!(out.contains("--- Probabilities ---"));
    assert!(out.contains("Winner:"));

    let total: i64 = read_records(&file).iter().map(effective_frequency).sum();
    assert_eq!(total, 4, "exactly one win should have been recorded");
}

#[test]
fn cli_draw_without_save_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("frequencies.json");

    run(&file, &["add", "--name", "Aline", "--offset", "1"]);
    run(&file, &["add", "--name", "Rayan", "--offset", "1"]);
    let before = std::fs::read_to_string(&file).unwrap();

    let draw = run(&file, &["draw", "--seed", "1", "--no-suspense"]);
    assert!(draw.status.success());
    assert_eq!(std::fs::read_to_string(&file).unwrap(), before);
}

#[test]
fn cli_draw_with_no_history_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("frequencies.json");

    run(&file, &["add", "--name", "Aline"]);
    run(&file, &["add", "--name", "Rayan"]);

    let draw = run(&file, &["draw", "--no-suspense", "--save"]);
    assert!(!draw.status.success());
    assert!(stderr(&draw).contains("error:"));

    let total: i64 = read_records(&file).iter().map(effective_frequency).sum();
    assert_eq!(total, 0, "a failed draw must not record anything");
}

#[test]
fn cli_win_is_idempotent_per_day() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("frequencies.json");

    run(&file, &["add", "--name", "Tocci"]);
    assert!(run(&file, &["win", "1"]).status.success());
    let again = run(&file, &["win", "1"]);
    assert!(again.status.success());
    assert!(stdout(&again).contains("already"));

    let records = read_records(&file);
    assert_eq!(records[0]["dates"].as_array().unwrap().len(), 1);

    assert!(!run(&file, &["win", "42"]).status.success());
}

#[test]
fn cli_balance_accepts_negative_offsets() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("frequencies.json");

    run(&file, &["add", "--name", "Claudio", "--offset", "3"]);
    let output = run(&file, &["balance", "1", "-1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(read_records(&file)[0]["balanceamento"], -1);
}

#[test]
fn cli_refuses_to_overwrite_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("frequencies.json");
    std::fs::write(&file, "not json").unwrap();

    let add = run(&file, &["add", "--name", "Aline"]);
    assert!(!add.status.success());
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "not json");

    let list = run(&file, &["list"]);
    assert!(list.status.success());
    assert!(stdout(&list).contains("No participants found"));
    assert!(stderr(&list).contains("starting with an empty collection"));
}

#[test]
fn cli_handles_extreme_stored_values() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("frequencies.json");
    std::fs::write(
        &file,
        r#"[
            {"id": 9223372036854775807, "name": "Aline", "alias": "", "dates": ["2024-01-01"], "balanceamento": 9223372036854775807},
            {"id": 1, "name": "Rayan", "alias": "", "dates": [], "balanceamento": 1}
        ]"#,
    )
    .unwrap();

    let list = run(&file, &["list"]);
    assert!(list.status.success(), "stderr: {}", stderr(&list));
    assert!(stdout(&list).contains("9223372036854775807"));

    let draw = run(&file, &["draw", "--seed", "4", "--no-suspense"]);
    assert!(draw.status.success(), "stderr: {}", stderr(&draw));

    let add = run(&file, &["add", "--name", "Thaina"]);
    assert!(!add.status.success());
    assert!(stderr(&add).contains("no participant id left"));
    assert_eq!(read_records(&file).len(), 2);
}

#[test]
fn cli_weights_writes_updated_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("participants.json");
    let output = dir.path().join("updated.json");
    std::fs::write(&input, r#"{"Aline": 2, "Passeto": 1, "Thaina": 1}"#).unwrap();

    let result = fairdraw_binary()
        .arg("weights")
        .arg(&input)
        .args(["--seed", "3", "--no-suspense", "--output"])
        .arg(&output)
        .output()
        .expect("failed to execute fairdraw weights");
    assert!(result.status.success(), "stderr: {}", stderr(&result));

    let updated: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let total: i64 = updated
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_i64().unwrap())
        .sum();
    assert_eq!(total, 5);
}

#[test]
fn cli_weights_rejects_negative_frequencies() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("participants.json");
    std::fs::write(&input, r#"{"Aline": 2, "Passeto": -1}"#).unwrap();

    let result = fairdraw_binary()
        .arg("weights")
        .arg(&input)
        .arg("--no-suspense")
        .output()
        .expect("failed to execute fairdraw weights");
    assert!(!result.status.success());
    assert!(stderr(&result).contains("negative"));
}
