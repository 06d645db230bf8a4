//! Environment-parameterized web hosting topology.
//!
//! Resolves an environment identifier into an [`EnvironmentProfile`] and
//! derives a dependency-ordered declaration graph from it: certificate,
//! storage origin, compute-service origin, routing layer, access binding
//! and DNS aliases. Nothing here performs I/O; the resulting [`Topology`]
//! is a description for an external provisioning engine to apply.

pub mod access;
pub mod assembler;
pub mod certificate;
pub mod config;
pub mod dns;
pub mod error;
pub mod origin;
pub mod reference;
pub mod routing;
pub mod service;
pub mod stack;

pub use access::{AccessBinding, DELIVERY_PRINCIPAL, SourceCondition, plan_access_binding};
pub use assembler::{
    BuildStage, Declaration, PendingTopology, Topology, TopologyAssembler, TopologyOutputs,
};
pub use certificate::{CertificateRequest, ZoneRef, plan_certificate};
pub use config::{DEFAULT_ENVIRONMENT, EnvironmentProfile, EnvironmentResolver, EnvironmentTable};
pub use dns::{DnsRecord, plan_dns_records, record_id};
pub use error::{Result, TopologyError};
pub use origin::{
    NetworkOrigin, Origin, OriginId, StorageOrigin, plan_network_origin, plan_storage_origin,
};
pub use reference::{Deferred, ForwardRef, ForwardRefs};
pub use routing::{
    CachePolicy, DistributionPlan, ForwardingPolicy, PathPattern, RouteRule, STATIC_PREFIXES,
    plan_distribution, plan_routes, resolve_path,
};
pub use service::ComputeServiceRequest;
pub use stack::{RemovalPolicy, StackMetadata};
