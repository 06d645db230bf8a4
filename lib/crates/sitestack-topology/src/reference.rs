//! Forward references between build stages.
//!
//! Some values only exist once an external collaborator has acted on an
//! earlier declaration: the compute service's endpoint, and the routing
//! layer's instance identity. The declaration phase records them as
//! [`Deferred::Pending`]; the binding phase resolves them from
//! [`ForwardRefs`] and refuses to continue without them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assembler::BuildStage;
use crate::error::{Result, TopologyError};

/// A value produced outside the assembler and supplied back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForwardRef {
    /// Resolved network address of the compute service.
    ServiceEndpoint,
    /// Source identifier of the specific routing-layer instance.
    DistributionSource,
    /// Canonical address of the routing layer (alias target).
    DistributionDomain,
}

impl ForwardRef {
    pub const ALL: [ForwardRef; 3] = [
        Self::ServiceEndpoint,
        Self::DistributionSource,
        Self::DistributionDomain,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ServiceEndpoint => "service-endpoint",
            Self::DistributionSource => "distribution-source",
            Self::DistributionDomain => "distribution-domain",
        }
    }

    /// First stage that cannot run without this value.
    #[must_use]
    pub fn needed_by(self) -> BuildStage {
        match self {
            Self::ServiceEndpoint => BuildStage::OriginsPlanned,
            Self::DistributionSource => BuildStage::AccessBound,
            Self::DistributionDomain => BuildStage::DnsBound,
        }
    }
}

impl fmt::Display for ForwardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration field whose value may not be known yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Deferred<T> {
    Pending(ForwardRef),
    Resolved(T),
}

impl<T> Deferred<T> {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    #[must_use]
    pub fn resolved(&self) -> Option<&T> {
        match self {
            Self::Pending(_) => None,
            Self::Resolved(value) => Some(value),
        }
    }
}

/// Values reported by external collaborators, keyed by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardRefs {
    values: BTreeMap<ForwardRef, String>,
}

impl ForwardRefs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`ForwardRefs::provide`].
    #[must_use]
    pub fn with(mut self, reference: ForwardRef, value: impl Into<String>) -> Self {
        self.provide(reference, value);
        self
    }

    /// Records `value` for `reference`, replacing any earlier value.
    pub fn provide(&mut self, reference: ForwardRef, value: impl Into<String>) {
        self.values.insert(reference, value.into());
    }

    /// The trimmed value, or `None` when absent or blank.
    #[must_use]
    pub fn get(&self, reference: ForwardRef) -> Option<&str> {
        self.values
            .get(&reference)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Like [`ForwardRefs::get`] but fails when the value is not available.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::MissingForwardReference`] naming `stage`.
    pub fn require(&self, reference: ForwardRef, stage: BuildStage) -> Result<&str> {
        self.get(reference)
            .ok_or(TopologyError::MissingForwardReference { reference, stage })
    }

    /// References with no usable value, in declaration order.
    #[must_use]
    pub fn missing(&self) -> Vec<ForwardRef> {
        ForwardRef::ALL
            .into_iter()
            .filter(|r| self.get(*r).is_none())
            .collect()
    }
}
