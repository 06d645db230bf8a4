//! Stack-level metadata shared by every declaration in one build.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EnvironmentProfile;

pub const PROJECT_NAME: &str = "sitestack";

/// What the provisioning engine does with a resource when the stack is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RemovalPolicy {
    Destroy,
    Retain,
}

impl RemovalPolicy {
    /// Production keeps its data; every other environment is disposable.
    #[must_use]
    pub fn for_profile(profile: &EnvironmentProfile) -> Self {
        if profile.is_production() {
            Self::Retain
        } else {
            Self::Destroy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackMetadata {
    pub name: String,
    pub description: String,
    pub tags: BTreeMap<String, String>,
}

impl StackMetadata {
    #[must_use]
    pub fn for_profile(profile: &EnvironmentProfile) -> Self {
        let env = profile.id();
        let tags = BTreeMap::from([
            ("Environment".to_string(), env.to_string()),
            ("Project".to_string(), PROJECT_NAME.to_string()),
        ]);
        Self {
            name: format!("{PROJECT_NAME}-{env}"),
            description: format!("Site infrastructure for {env}"),
            tags,
        }
    }
}
