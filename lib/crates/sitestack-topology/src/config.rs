//! Environment table and resolver.
//!
//! The table is an explicit immutable mapping handed to the resolver at
//! construction time. Pure data only: loading it from disk is the caller's
//! concern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::certificate::ZoneRef;
use crate::error::{Result, TopologyError};

/// Environment used when the invoking process does not name one.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

// ── Profile ──────────────────────────────────────────────────────────────────

/// Resolved configuration for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentProfile {
    /// Environment identifier. Filled from the table key.
    #[serde(default, skip_deserializing)]
    id: String,
    domain_name: String,
    storage_id: String,
    zone_name: String,
    zone_id: String,
    /// Record names to alias at the routing layer; `""` is the zone apex.
    record_names: Vec<String>,
}

impl EnvironmentProfile {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        domain_name: impl Into<String>,
        storage_id: impl Into<String>,
        zone_name: impl Into<String>,
        zone_id: impl Into<String>,
        record_names: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            domain_name: domain_name.into(),
            storage_id: storage_id.into(),
            zone_name: zone_name.into(),
            zone_id: zone_id.into(),
            record_names,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    #[must_use]
    pub fn storage_id(&self) -> &str {
        &self.storage_id
    }

    #[must_use]
    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    #[must_use]
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    #[must_use]
    pub fn record_names(&self) -> &[String] {
        &self.record_names
    }

    /// The owned DNS zone, used for certificate validation and alias records.
    #[must_use]
    pub fn zone(&self) -> ZoneRef {
        ZoneRef::new(&self.zone_name, &self.zone_id)
    }

    /// Whether this environment holds production data.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.id == "prod"
    }
}

// ── Table ────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawTable {
    environments: BTreeMap<String, EnvironmentProfile>,
}

impl From<RawTable> for EnvironmentTable {
    fn from(raw: RawTable) -> Self {
        Self::new(raw.environments)
    }
}

/// Immutable mapping from environment identifier to profile.
///
/// Deserializes from:
///
/// ```yaml
/// environments:
///   prod:
///     domainName: example.com
///     storageId: site-prod
///     zoneName: example.com
///     zoneId: Z1
///     recordNames: ["www", ""]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTable")]
pub struct EnvironmentTable {
    environments: BTreeMap<String, EnvironmentProfile>,
}

impl EnvironmentTable {
    /// Builds a table, stamping each profile with its key.
    #[must_use]
    pub fn new(environments: BTreeMap<String, EnvironmentProfile>) -> Self {
        let environments = environments
            .into_iter()
            .map(|(id, mut profile)| {
                profile.id.clone_from(&id);
                (id, profile)
            })
            .collect();
        Self { environments }
    }

    /// The table shipped with the binary.
    #[must_use]
    pub fn builtin() -> Self {
        let mut environments = BTreeMap::new();
        environments.insert(
            "dev".to_string(),
            EnvironmentProfile::new(
                "dev",
                "dev.example.com",
                "site-dev-example",
                "example.com",
                "Z0EXAMPLE0ZONE",
                vec!["www.dev".to_string(), "dev".to_string()],
            ),
        );
        environments.insert(
            "prod".to_string(),
            EnvironmentProfile::new(
                "prod",
                "example.com",
                "site-prod-example",
                "example.com",
                "Z0EXAMPLE0ZONE",
                vec!["www".to_string(), String::new()],
            ),
        );
        Self::new(environments)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EnvironmentProfile> {
        self.environments.get(id)
    }

    /// Known identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &EnvironmentProfile> {
        self.environments.values()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }
}

// ── Resolver ─────────────────────────────────────────────────────────────────

/// Maps an environment identifier to its profile.
#[derive(Debug, Clone)]
pub struct EnvironmentResolver {
    table: EnvironmentTable,
}

impl EnvironmentResolver {
    #[must_use]
    pub fn new(table: EnvironmentTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &EnvironmentTable {
        &self.table
    }

    /// Looks up `id`. There is no fallback environment.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnknownEnvironment`] if `id` has no entry.
    pub fn resolve(&self, id: &str) -> Result<EnvironmentProfile> {
        self.table
            .get(id)
            .cloned()
            .ok_or_else(|| TopologyError::UnknownEnvironment {
                id: id.to_string(),
                known: self.table.ids().collect::<Vec<_>>().join(", "),
            })
    }
}

impl Default for EnvironmentResolver {
    fn default() -> Self {
        Self::new(EnvironmentTable::builtin())
    }
}
