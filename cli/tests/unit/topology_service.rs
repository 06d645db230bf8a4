//! Tests for the topology application services.

#![allow(clippy::expect_used)]

use sitestack_cli::application::services::topology::{
    assemble_topology, declare_topology, list_environments,
};
use sitestack_cli::domain::{ReferenceValues, collect_references};
use sitestack_topology::{BuildStage, ForwardRef, TopologyError};

use crate::mocks::{InMemoryTable, NoopReporter, RecordingReporter, UnreadableTable};

fn full_refs() -> sitestack_topology::ForwardRefs {
    collect_references(&ReferenceValues {
        service_endpoint: Some("svc.internal:3000".to_string()),
        distribution_source: Some("dist-42".to_string()),
        distribution_domain: Some("d42.cloudfront.net".to_string()),
    })
}

#[test]
fn test_list_environments_is_sorted() {
    let profiles = list_environments(&InMemoryTable::builtin()).expect("list");
    let ids: Vec<_> = profiles.iter().map(|p| p.id()).collect();
    assert_eq!(ids, ["dev", "prod"]);
}

#[test]
fn test_list_environments_names_unreadable_source() {
    let err = list_environments(&UnreadableTable).expect_err("unreadable");
    let message = format!("{err:#}");
    assert!(message.contains("/etc/sitestack/environments.yaml"), "got: {message}");
    assert!(message.contains("permission denied"), "got: {message}");
}

#[test]
fn test_declare_stops_at_cert_planned() {
    let pending = declare_topology(&InMemoryTable::staging(), "staging", &NoopReporter)
        .expect("declare");
    assert_eq!(pending.stage(), BuildStage::CertPlanned);
    assert_eq!(pending.certificate().domain_name, "staging.example.org");
    assert_eq!(pending.pending_references().len(), 3);
}

#[test]
fn test_declare_reports_each_pending_reference() {
    let reporter = RecordingReporter::default();
    declare_topology(&InMemoryTable::builtin(), "dev", &reporter).expect("declare");
    let events = reporter.events.borrow();
    for reference in ForwardRef::ALL {
        assert!(
            events
                .iter()
                .any(|e| e.starts_with("step: waiting on") && e.contains(reference.as_str())),
            "no event for {reference}: {events:?}"
        );
    }
    assert!(events.iter().all(|e| !e.starts_with("warn:")));
}

#[test]
fn test_declare_unknown_environment_keeps_typed_error() {
    let err = declare_topology(&InMemoryTable::staging(), "prod", &NoopReporter)
        .expect_err("unknown env");
    let typed = err.downcast_ref::<TopologyError>().expect("typed error");
    assert_eq!(typed.code(), "UNKNOWN_ENVIRONMENT");
}

#[test]
fn test_assemble_custom_environment() {
    let topology = assemble_topology(&InMemoryTable::staging(), "staging", &full_refs(), &NoopReporter)
        .expect("assemble");
    assert_eq!(topology.environment, "staging");
    assert_eq!(topology.outputs.domain_url, "https://staging.example.org");
    assert_eq!(topology.outputs.service_url, "https://svc.internal:3000");
    assert_eq!(topology.access_binding.source(), "dist-42");
    assert_eq!(topology.dns_records.len(), 2);
}

#[test]
fn test_assemble_reports_success_last() {
    let reporter = RecordingReporter::default();
    assemble_topology(&InMemoryTable::builtin(), "prod", &full_refs(), &reporter)
        .expect("assemble");
    let events = reporter.events.borrow();
    let last = events.last().expect("events");
    assert!(last.starts_with("success: assembled"), "got: {last}");
}

#[test]
fn test_assemble_with_blank_reference_names_it() {
    let refs = collect_references(&ReferenceValues {
        service_endpoint: Some("svc.internal".to_string()),
        distribution_source: Some("dist-42".to_string()),
        distribution_domain: Some("   ".to_string()),
    });
    let err = assemble_topology(&InMemoryTable::builtin(), "dev", &refs, &NoopReporter)
        .expect_err("blank domain");
    assert_eq!(
        err.downcast_ref::<TopologyError>(),
        Some(&TopologyError::MissingForwardReference {
            reference: ForwardRef::DistributionDomain,
            stage: BuildStage::DnsBound,
        })
    );
}
