//! Tests for loading and selecting profiles.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_missing_config_file() {
    let t = Test::new();

    let output = t.cmd().args(["-project", "production"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read config file");
}

#[test]
fn test_empty_config_file() {
    let t = Test::with_config("");

    let output = t.cmd().args(["-project", "production"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "no configurations loaded");
}

#[test]
fn test_missing_field_names_profile_and_field() {
    let t = Test::with_config(CONFIG_MISSING_TABLE);

    // the broken profile is rejected even when another one is selected
    let output = t.cmd().args(["-project", "production"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "staging: missing table_name");
}

#[test]
fn test_unknown_project() {
    let t = Test::with_config(CONFIG);

    let output = t.cmd().args(["-project", "qa"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "init: selected config not found: \"qa\"");
}

#[test]
fn test_explicit_conf_path() {
    let t = Test::new();
    t.write("elsewhere.toml", CONFIG_MISSING_TABLE);

    t.cmd()
        .args(["-conf", "elsewhere.toml", "-project", "production"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("staging: missing table_name"));
}

#[test]
fn test_conf_from_env() {
    let t = Test::new();
    t.write("env.toml", "");

    t.cmd()
        .env("QCONF_CONFIG", t.path("env.toml"))
        .args(["-project", "production"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no configurations loaded"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_found_in_user_config_dir() {
    let t = Test::new();
    let dir = t.path("qconf");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("qconf.toml"), CONFIG).unwrap();

    let output = t.cmd().arg("-list").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "production");
}

#[test]
fn test_list_projects() {
    let t = Test::with_config(CONFIG);

    let output = t.cmd().arg("-list").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "2 projects");
    assert_stdout_contains(&output, "production");
    assert_stdout_contains(&output, "staging");
}

#[test]
fn test_list_projects_json() {
    let t = Test::with_config(CONFIG);

    let output = t.cmd().args(["-list", "-json"]).output().unwrap();
    assert_success(&output);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["projects"][0], "production");
    assert_eq!(json["projects"][1], "staging");
}
