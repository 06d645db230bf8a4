//! Origin declarations: the private storage origin and the compute-service
//! network origin.
//!
//! A [`StorageOrigin`] can only be built through [`plan_storage_origin`],
//! which always blocks public reads. Reads are granted to the routing layer
//! alone, by the access binding.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::assembler::BuildStage;
use crate::error::{Result, TopologyError};
use crate::reference::ForwardRef;
use crate::stack::RemovalPolicy;

pub const STORAGE_ORIGIN_ID: &str = "storage-origin";
pub const SERVICE_ORIGIN_ID: &str = "service-origin";

/// Stable reference to an origin, used by route rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginId(String);

impl OriginId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OriginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Access control ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SigningBehavior {
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SigningProtocol {
    SigV4,
}

/// Signed-request identity the routing layer uses towards the storage origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginAccessControl {
    pub name: String,
    pub description: String,
    pub signing: SigningBehavior,
    pub protocol: SigningProtocol,
}

/// Public access to the storage origin. Only blocking is expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PublicAccess {
    BlockAll,
}

// ── Storage origin ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageOrigin {
    id: OriginId,
    storage_id: String,
    public_access: PublicAccess,
    access_control: OriginAccessControl,
    removal_policy: RemovalPolicy,
    auto_delete_objects: bool,
}

impl StorageOrigin {
    #[must_use]
    pub fn id(&self) -> &OriginId {
        &self.id
    }

    #[must_use]
    pub fn storage_id(&self) -> &str {
        &self.storage_id
    }

    #[must_use]
    pub fn public_access(&self) -> PublicAccess {
        self.public_access
    }

    #[must_use]
    pub fn access_control(&self) -> &OriginAccessControl {
        &self.access_control
    }

    #[must_use]
    pub fn removal_policy(&self) -> RemovalPolicy {
        self.removal_policy
    }

    #[must_use]
    pub fn auto_delete_objects(&self) -> bool {
        self.auto_delete_objects
    }
}

/// Declares the private storage origin for `storage_id`.
#[must_use]
pub fn plan_storage_origin(storage_id: &str) -> StorageOrigin {
    StorageOrigin {
        id: OriginId(STORAGE_ORIGIN_ID.to_string()),
        storage_id: storage_id.to_string(),
        public_access: PublicAccess::BlockAll,
        access_control: OriginAccessControl {
            name: format!("oac-{storage_id}"),
            description: format!("Signed routing-layer access to {storage_id}"),
            signing: SigningBehavior::Always,
            protocol: SigningProtocol::SigV4,
        },
        removal_policy: RemovalPolicy::Destroy,
        auto_delete_objects: true,
    }
}

// ── Network origin ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OriginProtocol {
    HttpsOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOrigin {
    id: OriginId,
    endpoint: String,
    protocol: OriginProtocol,
}

impl NetworkOrigin {
    #[must_use]
    pub fn id(&self) -> &OriginId {
        &self.id
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn protocol(&self) -> OriginProtocol {
        self.protocol
    }

    /// `https://<endpoint>`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("https://{}", self.endpoint)
    }
}

/// Declares the compute-service origin for an already-resolved `endpoint`.
///
/// # Errors
///
/// Returns [`TopologyError::MissingForwardReference`] for a blank endpoint
/// and [`TopologyError::InvalidEndpoint`] for anything that is not a bare
/// `host[:port]`.
pub fn plan_network_origin(endpoint: &str) -> Result<NetworkOrigin> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(TopologyError::MissingForwardReference {
            reference: ForwardRef::ServiceEndpoint,
            stage: BuildStage::OriginsPlanned,
        });
    }
    validate_endpoint(endpoint)?;
    Ok(NetworkOrigin {
        id: OriginId(SERVICE_ORIGIN_ID.to_string()),
        endpoint: endpoint.to_string(),
        protocol: OriginProtocol::HttpsOnly,
    })
}

/// `host[:port]`: a host free of whitespace, '/' and ':', then an optional
/// port.
static ENDPOINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^(?P<host>[^\s/:]+)(?::(?P<port>[^:]*))?$").expect("valid regex")
});

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let invalid = |reason: &str| TopologyError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: reason.to_string(),
    };
    if endpoint.contains("://") {
        return Err(invalid("expected host[:port] without a scheme"));
    }
    let caps = ENDPOINT_RE.captures(endpoint).ok_or_else(|| {
        invalid("expected host[:port] with a non-empty host and no whitespace or '/'")
    })?;
    if let Some(port) = caps.name("port") {
        port.as_str()
            .parse::<u16>()
            .map_err(|_| invalid("port must be a number between 0 and 65535"))?;
    }
    Ok(())
}

// ── Origin ───────────────────────────────────────────────────────────────────

/// Either kind of origin, as listed in the declaration graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Origin {
    Storage(StorageOrigin),
    Network(NetworkOrigin),
}

impl Origin {
    #[must_use]
    pub fn id(&self) -> &OriginId {
        match self {
            Self::Storage(origin) => origin.id(),
            Self::Network(origin) => origin.id(),
        }
    }
}
