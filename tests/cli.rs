//! End-to-end tests for the one-shot CLI modes.
//!
//! Each test runs the built binary against a scratch data file.

use std::{fs, path::Path, process::Command};

use tempfile::TempDir;

/// Run the binary with a data file in `dir` and return (code, stdout, stderr).
fn run_cli(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_cleanup-timer"))
        .args(args)
        .arg("--data-file")
        .arg(dir.join("timer_data.json"))
        .arg("--cleanup-script")
        .arg(dir.join("cleanup.sh"))
        .output()
        .expect("Failed to execute cleanup-timer");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn stored_end_time(dir: &Path) -> String {
    let raw = fs::read_to_string(dir.join("timer_data.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value["end_time"].as_str().unwrap().to_string()
}

#[test]
fn test_status_reports_stored_deadline() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("timer_data.json"),
        r#"{"end_time": "2099-01-01T00:00:00.000000"}"#,
    )
    .unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["status"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("2099-01-01T00:00:00.000000"));
    assert!(stdout.contains("Remaining:"));
    assert_eq!(stored_end_time(dir.path()), "2099-01-01T00:00:00.000000");
}

#[test]
fn test_status_of_expired_deadline_shows_zero() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("timer_data.json"),
        r#"{"end_time": "2000-01-01T00:00:00.000000"}"#,
    )
    .unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["status"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("00:00:00"));
}

#[test]
fn test_status_json() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("timer_data.json"),
        r#"{"end_time": "2099-01-01T00:00:00.000000"}"#,
    )
    .unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["status", "--json"]);

    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["end_time"], "2099-01-01T00:00:00.000000");
    assert_eq!(value["phase"], "armed");
    assert!(value["remaining_seconds"].as_u64().unwrap() > 0);
}

#[test]
fn test_status_without_record_creates_one() {
    let dir = TempDir::new().unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["status"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("Remaining: 1"), "unexpected output: {stdout}");
    assert!(!stored_end_time(dir.path()).is_empty());
}

#[test]
fn test_reset_replaces_corrupt_record() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("timer_data.json"), "not json at all").unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["reset"]);

    assert_eq!(code, 0);
    let end_time = stored_end_time(dir.path());
    assert!(stdout.contains(&end_time), "stdout {stdout:?} lacks {end_time}");
}

#[test]
fn test_reset_moves_expired_deadline_forward() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("timer_data.json"),
        r#"{"end_time": "2000-01-01T00:00:00.000000"}"#,
    )
    .unwrap();

    let (code, _, _) = run_cli(dir.path(), &["reset"]);

    assert_eq!(code, 0);
    assert!(stored_end_time(dir.path()).as_str() > "2000-01-01T00:00:00.000000");
}

#[test]
fn test_reset_fails_when_record_cannot_be_written() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("timer_data.json")).unwrap();

    let (code, _, _) = run_cli(dir.path(), &["reset"]);

    assert_eq!(code, 1);
}

#[test]
fn test_unknown_mode_is_usage_error() {
    let dir = TempDir::new().unwrap();

    let (code, _, stderr) = run_cli(dir.path(), &["explode"]);

    assert_eq!(code, 2);
    assert!(stderr.contains("Usage"));
}
