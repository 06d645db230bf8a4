//! Topology assembly.
//!
//! A build runs in two phases. [`TopologyAssembler::declare`] resolves the
//! environment and plans everything that depends only on configuration,
//! leaving placeholders for values an external collaborator reports later.
//! [`PendingTopology::bind`] fills those placeholders and plans the rest.
//!
//! ```text
//! Unresolved -> ConfigResolved -> CertPlanned            (declare)
//!   -> OriginsPlanned -> RoutingPlanned -> AccessBound
//!   -> DnsBound -> Complete                              (bind)
//! ```
//!
//! Any failure moves the build to `Failed` and no topology is returned.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::access::{AccessBinding, DELIVERY_PRINCIPAL, plan_access_binding};
use crate::certificate::{CertificateRequest, plan_certificate};
use crate::config::{EnvironmentProfile, EnvironmentResolver};
use crate::dns::{DnsRecord, plan_dns_records};
use crate::error::{Result, TopologyError};
use crate::origin::{NetworkOrigin, Origin, StorageOrigin, plan_network_origin, plan_storage_origin};
use crate::reference::{Deferred, ForwardRef, ForwardRefs};
use crate::routing::{DistributionPlan, STATIC_PREFIXES, plan_distribution};
use crate::service::ComputeServiceRequest;
use crate::stack::StackMetadata;

// ── Build stages ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildStage {
    Unresolved,
    ConfigResolved,
    CertPlanned,
    OriginsPlanned,
    RoutingPlanned,
    AccessBound,
    DnsBound,
    Complete,
    Failed,
}

impl BuildStage {
    /// The stage a healthy build enters next, `None` once terminal.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Unresolved => Some(Self::ConfigResolved),
            Self::ConfigResolved => Some(Self::CertPlanned),
            Self::CertPlanned => Some(Self::OriginsPlanned),
            Self::OriginsPlanned => Some(Self::RoutingPlanned),
            Self::RoutingPlanned => Some(Self::AccessBound),
            Self::AccessBound => Some(Self::DnsBound),
            Self::DnsBound => Some(Self::Complete),
            Self::Complete | Self::Failed => None,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Moves `stage` to `to`, which must be its successor.
fn advance(stage: &mut BuildStage, to: BuildStage, env: &str) -> Result<()> {
    if stage.next() != Some(to) {
        return Err(TopologyError::StageOrder {
            expected: stage.next().unwrap_or(*stage),
            found: to,
        });
    }
    *stage = to;
    tracing::debug!(env, stage = %to, "build stage reached");
    Ok(())
}

// ── Outputs ──────────────────────────────────────────────────────────────────

/// Named values exposed once a build completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyOutputs {
    #[serde(rename = "storageId")]
    pub storage_id: String,
    #[serde(rename = "distributionURL")]
    pub distribution_url: String,
    #[serde(rename = "domainURL")]
    pub domain_url: String,
    #[serde(rename = "serviceURL")]
    pub service_url: String,
}

impl TopologyOutputs {
    /// `(name, value)` pairs in a fixed order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("StorageId", &self.storage_id),
            ("DistributionURL", &self.distribution_url),
            ("DomainURL", &self.domain_url),
            ("ServiceURL", &self.service_url),
        ]
    }
}

// ── Topology ─────────────────────────────────────────────────────────────────

/// A fully bound declaration graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    pub environment: String,
    pub stack: StackMetadata,
    pub certificate: CertificateRequest,
    pub storage_origin: StorageOrigin,
    pub service: ComputeServiceRequest,
    pub network_origin: NetworkOrigin,
    pub distribution: DistributionPlan,
    pub access_binding: AccessBinding,
    pub dns_records: Vec<DnsRecord>,
    pub outputs: TopologyOutputs,
}

/// One node of the declaration graph, borrowed from a [`Topology`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration<'a> {
    Certificate(&'a CertificateRequest),
    StorageOrigin(&'a StorageOrigin),
    ComputeService(&'a ComputeServiceRequest),
    NetworkOrigin(&'a NetworkOrigin),
    Distribution(&'a DistributionPlan),
    AccessBinding(&'a AccessBinding),
    DnsRecord(&'a DnsRecord),
}

impl Declaration<'_> {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Certificate(c) => &c.id,
            Self::StorageOrigin(o) => o.id().as_str(),
            Self::ComputeService(s) => &s.id,
            Self::NetworkOrigin(o) => o.id().as_str(),
            Self::Distribution(d) => &d.id,
            Self::AccessBinding(a) => &a.id,
            Self::DnsRecord(r) => &r.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Certificate(_) => "certificate",
            Self::StorageOrigin(_) => "storage-origin",
            Self::ComputeService(_) => "compute-service",
            Self::NetworkOrigin(_) => "network-origin",
            Self::Distribution(_) => "distribution",
            Self::AccessBinding(_) => "access-binding",
            Self::DnsRecord(_) => "dns-record",
        }
    }
}

impl Topology {
    /// Both origins, storage first.
    #[must_use]
    pub fn origins(&self) -> Vec<Origin> {
        vec![
            Origin::Storage(self.storage_origin.clone()),
            Origin::Network(self.network_origin.clone()),
        ]
    }

    /// Every declaration in dependency order.
    #[must_use]
    pub fn declarations(&self) -> Vec<Declaration<'_>> {
        let mut out = vec![
            Declaration::Certificate(&self.certificate),
            Declaration::StorageOrigin(&self.storage_origin),
            Declaration::ComputeService(&self.service),
            Declaration::NetworkOrigin(&self.network_origin),
            Declaration::Distribution(&self.distribution),
            Declaration::AccessBinding(&self.access_binding),
        ];
        out.extend(self.dns_records.iter().map(Declaration::DnsRecord));
        out
    }
}

// ── Pending topology ─────────────────────────────────────────────────────────

/// Result of the declaration phase, waiting on forward references.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTopology {
    stage: BuildStage,
    profile: EnvironmentProfile,
    stack: StackMetadata,
    certificate: CertificateRequest,
    storage_origin: StorageOrigin,
    service: ComputeServiceRequest,
    static_prefixes: Vec<String>,
    service_endpoint: Deferred<String>,
    distribution_source: Deferred<String>,
    distribution_domain: Deferred<String>,
}

impl PendingTopology {
    #[must_use]
    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    #[must_use]
    pub fn profile(&self) -> &EnvironmentProfile {
        &self.profile
    }

    #[must_use]
    pub fn stack(&self) -> &StackMetadata {
        &self.stack
    }

    #[must_use]
    pub fn certificate(&self) -> &CertificateRequest {
        &self.certificate
    }

    #[must_use]
    pub fn storage_origin(&self) -> &StorageOrigin {
        &self.storage_origin
    }

    #[must_use]
    pub fn service(&self) -> &ComputeServiceRequest {
        &self.service
    }

    /// Placeholders still unresolved, with the stage each one blocks.
    #[must_use]
    pub fn pending_references(&self) -> Vec<(ForwardRef, BuildStage)> {
        [
            &self.service_endpoint,
            &self.distribution_source,
            &self.distribution_domain,
        ]
        .into_iter()
        .filter_map(|d| match d {
            Deferred::Pending(r) => Some((*r, r.needed_by())),
            Deferred::Resolved(_) => None,
        })
        .collect()
    }

    /// Binding phase: fills placeholders from `refs` and plans the
    /// remaining stages.
    ///
    /// On failure the build moves to [`BuildStage::Failed`]; binding again
    /// afterwards, or after success, is a [`TopologyError::StageOrder`].
    ///
    /// # Errors
    ///
    /// Returns the first planner failure, or
    /// [`TopologyError::MissingForwardReference`] when `refs` lacks a value a
    /// stage needs.
    pub fn bind(&mut self, refs: &ForwardRefs) -> Result<Topology> {
        match self.bind_stages(refs) {
            Ok(topology) => {
                tracing::info!(
                    env = self.profile.id(),
                    declarations = topology.declarations().len(),
                    "topology assembled"
                );
                Ok(topology)
            }
            Err(e) => {
                tracing::warn!(
                    env = self.profile.id(),
                    stage = %self.stage,
                    error = %e,
                    "topology build failed"
                );
                self.stage = BuildStage::Failed;
                Err(e)
            }
        }
    }

    fn bind_stages(&mut self, refs: &ForwardRefs) -> Result<Topology> {
        if self.stage != BuildStage::CertPlanned {
            return Err(TopologyError::StageOrder {
                expected: BuildStage::CertPlanned,
                found: self.stage,
            });
        }
        let env = self.profile.id().to_string();

        // Origins
        let endpoint = refs.require(ForwardRef::ServiceEndpoint, BuildStage::OriginsPlanned)?;
        let network_origin = plan_network_origin(endpoint)?;
        advance(&mut self.stage, BuildStage::OriginsPlanned, &env)?;

        // Routing
        let distribution = plan_distribution(
            self.profile.domain_name(),
            &self.certificate,
            &self.storage_origin,
            &network_origin,
            &self.static_prefixes,
        )?;
        advance(&mut self.stage, BuildStage::RoutingPlanned, &env)?;

        // Access
        let source = refs.require(ForwardRef::DistributionSource, BuildStage::AccessBound)?;
        let access_binding =
            plan_access_binding(self.profile.storage_id(), DELIVERY_PRINCIPAL, source)?;
        advance(&mut self.stage, BuildStage::AccessBound, &env)?;

        // DNS
        let canonical = refs.require(ForwardRef::DistributionDomain, BuildStage::DnsBound)?;
        let dns_records =
            plan_dns_records(&self.profile.zone(), self.profile.record_names(), canonical)?;
        advance(&mut self.stage, BuildStage::DnsBound, &env)?;

        let outputs = TopologyOutputs {
            storage_id: self.profile.storage_id().to_string(),
            distribution_url: format!("https://{canonical}"),
            domain_url: format!("https://{}", self.profile.domain_name()),
            service_url: network_origin.url(),
        };
        advance(&mut self.stage, BuildStage::Complete, &env)?;

        // Placeholders are only filled once every stage has succeeded.
        self.service_endpoint = Deferred::Resolved(network_origin.endpoint().to_string());
        self.distribution_source = Deferred::Resolved(access_binding.source().to_string());
        self.distribution_domain = Deferred::Resolved(canonical.to_string());

        Ok(Topology {
            environment: env,
            stack: self.stack.clone(),
            certificate: self.certificate.clone(),
            storage_origin: self.storage_origin.clone(),
            service: self.service.clone(),
            network_origin,
            distribution,
            access_binding,
            dns_records,
            outputs,
        })
    }
}

// ── Assembler ────────────────────────────────────────────────────────────────

/// Orchestrates the planners in dependency order.
#[derive(Debug, Clone)]
pub struct TopologyAssembler {
    resolver: EnvironmentResolver,
    static_prefixes: Vec<String>,
}

impl TopologyAssembler {
    /// Assembler routing [`STATIC_PREFIXES`] to storage.
    #[must_use]
    pub fn new(resolver: EnvironmentResolver) -> Self {
        Self {
            resolver,
            static_prefixes: STATIC_PREFIXES.iter().map(ToString::to_string).collect(),
        }
    }

    #[must_use]
    pub fn with_static_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.static_prefixes = prefixes;
        self
    }

    #[must_use]
    pub fn resolver(&self) -> &EnvironmentResolver {
        &self.resolver
    }

    /// Declaration phase for `env_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnknownEnvironment`] if `env_id` is not in
    /// the table; no planner runs in that case.
    pub fn declare(&self, env_id: &str) -> Result<PendingTopology> {
        let mut stage = BuildStage::Unresolved;

        let profile = self.resolver.resolve(env_id).inspect_err(|e| {
            tracing::warn!(env = env_id, error = %e, "topology build failed");
        })?;
        advance(&mut stage, BuildStage::ConfigResolved, env_id)?;

        let certificate = plan_certificate(profile.domain_name(), &profile.zone());
        advance(&mut stage, BuildStage::CertPlanned, env_id)?;

        Ok(PendingTopology {
            stage,
            stack: StackMetadata::for_profile(&profile),
            storage_origin: plan_storage_origin(profile.storage_id()),
            service: ComputeServiceRequest::for_profile(&profile),
            certificate,
            static_prefixes: self.static_prefixes.clone(),
            service_endpoint: Deferred::Pending(ForwardRef::ServiceEndpoint),
            distribution_source: Deferred::Pending(ForwardRef::DistributionSource),
            distribution_domain: Deferred::Pending(ForwardRef::DistributionDomain),
            profile,
        })
    }

    /// Both phases in one call.
    ///
    /// # Errors
    ///
    /// Any error from [`TopologyAssembler::declare`] or
    /// [`PendingTopology::bind`].
    pub fn assemble(&self, env_id: &str, refs: &ForwardRefs) -> Result<Topology> {
        self.declare(env_id)?.bind(refs)
    }
}

impl Default for TopologyAssembler {
    fn default() -> Self {
        Self::new(EnvironmentResolver::default())
    }
}
