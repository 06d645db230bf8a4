//! Environment tables loaded from `--config` / `SITESTACK_CONFIG`.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use predicates::prelude::*;
use tempfile::TempDir;

use crate::cli_tests::sitestack;

const TABLE: &str = "\
environments:
  staging:
    domainName: staging.example.org
    storageId: site-staging
    zoneName: example.org
    zoneId: Z2STAGING
    recordNames: [staging, www.staging]
";

fn write_table(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("environments.yaml");
    std::fs::write(&path, content).expect("write table");
    (dir, path)
}

#[test]
fn test_config_flag_replaces_builtin_table() {
    let (_dir, path) = write_table(TABLE);
    sitestack()
        .arg("envs")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("staging.example.org"))
        .stdout(predicate::str::contains("prod").not());
}

#[test]
fn test_config_env_var_is_honored() {
    let (_dir, path) = write_table(TABLE);
    let output = sitestack()
        .args(["plan", "--env", "staging", "--json"])
        .env("SITESTACK_CONFIG", &path)
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["stack"]["name"], "sitestack-staging");
    assert_eq!(value["storageOrigin"]["storageId"], "site-staging");
}

#[test]
fn test_default_env_missing_from_custom_table_fails() {
    let (_dir, path) = write_table(TABLE);
    sitestack()
        .arg("plan")
        .arg("--config")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn test_render_from_custom_table() {
    let (_dir, path) = write_table(TABLE);
    let output = sitestack()
        .args(["render", "--env", "staging", "--json"])
        .arg("--config")
        .arg(&path)
        .args([
            "--service-endpoint",
            "svc.internal",
            "--distribution-source",
            "dist-9",
            "--distribution-domain",
            "d9.cloudfront.net",
        ])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let fqdns: Vec<_> = value["dnsRecords"]
        .as_array()
        .expect("records")
        .iter()
        .map(|r| r["fqdn"].as_str().expect("fqdn").to_string())
        .collect();
    assert_eq!(fqdns, ["staging.example.org", "www.staging.example.org"]);
}

#[test]
fn test_missing_config_file_fails() {
    sitestack()
        .args(["envs", "--config", "/nonexistent/environments.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_malformed_config_reports_generic_code() {
    let (_dir, path) = write_table("environments: [oops]");
    let output = sitestack()
        .args(["envs", "--json"])
        .arg("--config")
        .arg(&path)
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["code"], "ERROR");
}
