//! Storage-origin read grant for the routing layer.
//!
//! The grant is pinned to one routing-layer instance by an exact match on
//! its source identifier. Blank and wildcarded identifiers are refused.

use serde::{Deserialize, Serialize};

use crate::assembler::BuildStage;
use crate::error::{Result, TopologyError};
use crate::reference::ForwardRef;

pub const ACCESS_BINDING_ID: &str = "StorageReadGrant";

/// Service identity the routing layer signs origin requests with.
pub const DELIVERY_PRINCIPAL: &str = "cloudfront.amazonaws.com";

/// Condition key carrying the calling instance's source identifier.
pub const SOURCE_CONDITION_KEY: &str = "AWS:SourceArn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessAction {
    #[serde(rename = "s3:GetObject")]
    GetObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Principal {
    Service(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOperator {
    StringEquals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCondition {
    pub operator: ConditionOperator,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessBinding {
    pub id: String,
    pub actions: Vec<AccessAction>,
    pub principal: Principal,
    /// Every key under the storage origin.
    pub resource: String,
    pub condition: SourceCondition,
}

impl AccessBinding {
    /// The exact instance identifier this binding is pinned to.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.condition.value
    }
}

/// Grants `signing_principal` read access to `storage_id`, restricted to the
/// routing-layer instance identified by `source_condition`.
///
/// # Errors
///
/// Returns [`TopologyError::MissingForwardReference`] for a blank
/// `source_condition` and [`TopologyError::WildcardAccessCondition`] when it
/// contains a wildcard.
pub fn plan_access_binding(
    storage_id: &str,
    signing_principal: &str,
    source_condition: &str,
) -> Result<AccessBinding> {
    let source = source_condition.trim();
    if source.is_empty() {
        return Err(TopologyError::MissingForwardReference {
            reference: ForwardRef::DistributionSource,
            stage: BuildStage::AccessBound,
        });
    }
    if source.contains(['*', '?']) {
        return Err(TopologyError::WildcardAccessCondition {
            condition: source.to_string(),
        });
    }
    Ok(AccessBinding {
        id: ACCESS_BINDING_ID.to_string(),
        actions: vec![AccessAction::GetObject],
        principal: Principal::Service(signing_principal.to_string()),
        resource: format!("{storage_id}/*"),
        condition: SourceCondition {
            operator: ConditionOperator::StringEquals,
            key: SOURCE_CONDITION_KEY.to_string(),
            value: source.to_string(),
        },
    })
}
