//! Typed topology errors.
//!
//! Every variant is fatal to the build it occurs in. Nothing is retried
//! here; a caller that wants a retry re-runs the whole build.

use thiserror::Error;

use crate::assembler::BuildStage;
use crate::reference::ForwardRef;

/// Convenience alias used by every planner.
pub type Result<T, E = TopologyError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    // ── Configuration ────────────────────────────────────────────────────────
    #[error("Unknown environment '{id}'. Known environments: {known}")]
    UnknownEnvironment { id: String, known: String },

    // ── Ordering ─────────────────────────────────────────────────────────────
    #[error("Missing forward reference '{reference}' required by stage {stage}")]
    MissingForwardReference {
        reference: ForwardRef,
        stage: BuildStage,
    },

    #[error("Build stage out of order: expected {expected}, found {found}")]
    StageOrder {
        expected: BuildStage,
        found: BuildStage,
    },

    // ── Origins and routing ──────────────────────────────────────────────────
    #[error("Invalid service endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Route pattern '{pattern}' is declared more than once")]
    ConflictingRoute { pattern: String },

    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidRoutePattern { pattern: String, reason: String },

    // ── Access ───────────────────────────────────────────────────────────────
    #[error("Access condition '{condition}' must name a single routing-layer instance")]
    WildcardAccessCondition { condition: String },

    // ── DNS ──────────────────────────────────────────────────────────────────
    #[error("Invalid DNS record name '{name}': {reason}")]
    InvalidRecordName { name: String, reason: String },

    #[error("DNS record name '{name}' is configured more than once")]
    DuplicateRecordName { name: String },

    #[error("{}", join_messages(.0))]
    RecordNames(Vec<TopologyError>),
}

impl TopologyError {
    /// Stable machine-readable code for JSON error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownEnvironment { .. } => "UNKNOWN_ENVIRONMENT",
            Self::MissingForwardReference { .. } => "MISSING_FORWARD_REFERENCE",
            Self::StageOrder { .. } => "STAGE_ORDER",
            Self::InvalidEndpoint { .. } => "INVALID_ENDPOINT",
            Self::ConflictingRoute { .. } => "CONFLICTING_ROUTE",
            Self::InvalidRoutePattern { .. } => "INVALID_ROUTE_PATTERN",
            Self::WildcardAccessCondition { .. } => "WILDCARD_ACCESS_CONDITION",
            Self::InvalidRecordName { .. } | Self::RecordNames(_) => "INVALID_RECORD_NAME",
            Self::DuplicateRecordName { .. } => "DUPLICATE_RECORD_NAME",
        }
    }
}

fn join_messages(errors: &[TopologyError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
