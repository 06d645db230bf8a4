//! plan, render and outputs against the built-in table.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::cli_tests::sitestack;

const REFS: [&str; 6] = [
    "--service-endpoint",
    "abc123.awsapprunner.com",
    "--distribution-source",
    "arn:aws:cloudfront::123456789012:distribution/E1ABC",
    "--distribution-domain",
    "d111111abcdef8.cloudfront.net",
];

fn json_stdout(args: &[&str]) -> serde_json::Value {
    let output = sitestack().args(args).output().expect("run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json")
}

#[test]
fn test_plan_defaults_to_dev() {
    sitestack()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitestack-dev"))
        .stdout(predicate::str::contains("dev.example.com"))
        .stdout(predicate::str::contains("service-endpoint"));
}

#[test]
fn test_plan_reads_env_from_environment_variable() {
    sitestack()
        .arg("plan")
        .env("SITESTACK_ENV", "prod")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitestack-prod"));
}

#[test]
fn test_plan_json_reports_pending_references() {
    let value = json_stdout(&["plan", "--env", "prod", "--json"]);
    assert_eq!(value["stage"], "CertPlanned");
    assert_eq!(value["certificate"]["domainName"], "example.com");
    assert_eq!(value["serviceEndpoint"]["pending"], "service-endpoint");
}

#[test]
fn test_render_prod_json() {
    let mut args = vec!["render", "--env", "prod", "--format", "json"];
    args.extend(REFS);
    let value = json_stdout(&args);

    assert_eq!(value["environment"], "prod");
    let rules = value["distribution"]["rules"].as_array().expect("rules");
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[2]["target"], "service-origin");
    assert_eq!(
        value["accessBinding"]["condition"]["value"],
        "arn:aws:cloudfront::123456789012:distribution/E1ABC"
    );
    let records = value["dnsRecords"].as_array().expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["fqdn"], "example.com");
    assert_eq!(value["outputs"]["domainURL"], "https://example.com");
}

#[test]
fn test_render_yaml() {
    let mut args = vec!["render", "--format", "yaml"];
    args.extend(REFS);
    sitestack()
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("environment: dev"))
        .stdout(predicate::str::contains("storage-origin"));
}

#[test]
fn test_render_human_shows_routes_and_outputs() {
    let mut args = vec!["render", "--env", "prod"];
    args.extend(REFS);
    sitestack()
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("/static/*"))
        .stdout(predicate::str::contains("(default)"))
        .stdout(predicate::str::contains("www.example.com"))
        .stdout(predicate::str::contains("https://d111111abcdef8.cloudfront.net"));
}

#[test]
fn test_outputs_json_reads_references_from_environment() {
    let output = sitestack()
        .args(["outputs", "--json"])
        .env("SITESTACK_SERVICE_ENDPOINT", "app.internal:3000")
        .env("SITESTACK_DISTRIBUTION_SOURCE", "dist-123")
        .env("SITESTACK_DISTRIBUTION_DOMAIN", "d123.cloudfront.net")
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["storageId"], "site-dev-example");
    assert_eq!(value["distributionURL"], "https://d123.cloudfront.net");
    assert_eq!(value["serviceURL"], "https://app.internal:3000");
}

#[test]
fn test_unknown_environment_fails() {
    sitestack()
        .args(["plan", "--env", "qa"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("qa"));
}

#[test]
fn test_unknown_environment_json_error_code() {
    let output = sitestack()
        .args(["plan", "--env", "qa", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "UNKNOWN_ENVIRONMENT");
}

#[test]
fn test_missing_reference_names_the_reference() {
    let output = sitestack()
        .args([
            "render",
            "--json",
            "--service-endpoint",
            "app.internal:3000",
        ])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["code"], "MISSING_FORWARD_REFERENCE");
    assert!(
        value["message"]
            .as_str()
            .expect("message")
            .contains("distribution-source")
    );
}

#[test]
fn test_wildcard_source_is_rejected() {
    let output = sitestack()
        .args([
            "render",
            "--json",
            "--service-endpoint",
            "app.internal:3000",
            "--distribution-source",
            "arn:aws:cloudfront::123:distribution/*",
            "--distribution-domain",
            "d123.cloudfront.net",
        ])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["code"], "WILDCARD_ACCESS_CONDITION");
}
