//! Argument parsing, help and version.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

pub fn sitestack() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sitestack"));
    cmd.env("NO_COLOR", "1")
        .env("HOME", "/nonexistent-sitestack-home")
        .env_remove("RUST_LOG")
        .env_remove("SITESTACK_ENV")
        .env_remove("SITESTACK_CONFIG")
        .env_remove("SITESTACK_SERVICE_ENDPOINT")
        .env_remove("SITESTACK_DISTRIBUTION_SOURCE")
        .env_remove("SITESTACK_DISTRIBUTION_DOMAIN");
    cmd
}

#[test]
fn test_cli_no_args_shows_help() {
    sitestack().assert().code(2).stderr(predicate::str::contains(
        "Plan the web hosting topology",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    sitestack()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("outputs"))
        .stdout(predicate::str::contains("envs"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    sitestack()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitestack"));
}

#[test]
fn test_version_command_shows_version() {
    sitestack()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitestack v0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = sitestack()
        .args(["version", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["version"], "0.1.0");
}

#[test]
fn test_render_help_shows_reference_env_vars() {
    sitestack()
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SITESTACK_SERVICE_ENDPOINT"))
        .stdout(predicate::str::contains("SITESTACK_DISTRIBUTION_SOURCE"))
        .stdout(predicate::str::contains("SITESTACK_DISTRIBUTION_DOMAIN"));
}

#[test]
fn test_invalid_format_is_rejected() {
    sitestack()
        .args(["plan", "--format", "toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_envs_lists_builtin_table() {
    sitestack()
        .arg("envs")
        .assert()
        .success()
        .stdout(predicate::str::contains("dev"))
        .stdout(predicate::str::contains("prod (production)"))
        .stdout(predicate::str::contains("built-in table"));
}

#[test]
fn test_envs_json_is_sorted_by_id() {
    let output = sitestack().args(["envs", "--json"]).output().expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let ids: Vec<_> = value
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["id"].as_str().expect("id").to_string())
        .collect();
    assert_eq!(ids, ["dev", "prod"]);
}

#[test]
fn test_no_color_env_accepts_conventional_values() {
    for value in ["1", "", "true", "yes", "0"] {
        sitestack()
            .env("NO_COLOR", value)
            .arg("envs")
            .assert()
            .success()
            .stdout(predicate::str::contains("\x1b[").not());
    }
}

#[test]
fn test_no_color_flag_combines_with_env() {
    sitestack()
        .env("NO_COLOR", "1")
        .args(["--no-color", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sitestack v0.1.0"));
}
