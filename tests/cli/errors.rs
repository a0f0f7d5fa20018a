//! Tests for CLI flags and error reporting.

use crate::support::*;

#[test]
fn test_help_succeeds() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "qconf");
    assert_stdout_contains(&output, "--project");
}

#[test]
fn test_single_dash_help() {
    let t = Test::new();

    let output = t.cmd().arg("-help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "--edit");
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "qconf");
}

#[test]
fn test_unknown_flag_exits_one() {
    let t = Test::new();

    let output = t.cmd().arg("--no-such-flag").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_missing_project_fails() {
    let t = Test::with_config(CONFIG);

    let output = t.cmd().output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "Error:");
    assert_stderr_contains(&output, "argument \"project\" is required");
}

#[test]
fn test_missing_store_binary_fails_at_init() {
    let t = Test::with_config(CONFIG);

    let output = t.cmd().args(["-project", "production"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "Error: init: secret store unavailable");
}

#[test]
fn test_completions_bash() {
    let t = Test::new();

    let output = t.cmd().args(["--completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "qconf");
}
