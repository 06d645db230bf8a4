//! Request for the compute service behind the network origin.
//!
//! The service itself is provisioned by an external collaborator; its
//! resolved endpoint comes back as [`ForwardRef::ServiceEndpoint`].
//!
//! [`ForwardRef::ServiceEndpoint`]: crate::reference::ForwardRef::ServiceEndpoint

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EnvironmentProfile;
use crate::stack::{PROJECT_NAME, RemovalPolicy};

pub const SERVICE_ID: &str = "ComputeService";
pub const SERVICE_PORT: u16 = 3000;
pub const IMAGE_TAG: &str = "latest";
/// Managed grant attached to the image-pull role.
pub const IMAGE_PULL_GRANT: &str = "ContainerRegistryReadOnly";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    pub repository: String,
    pub tag: String,
    pub repository_removal: RemovalPolicy,
    pub pull_role_grant: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeServiceRequest {
    pub id: String,
    pub service_name: String,
    pub image: ImageSource,
    pub port: u16,
    pub environment: BTreeMap<String, String>,
    pub auto_deployments: bool,
    /// Export name under which the resolved URL is published.
    pub url_export: String,
}

impl ComputeServiceRequest {
    #[must_use]
    pub fn for_profile(profile: &EnvironmentProfile) -> Self {
        let env = profile.id();
        let name = format!("{PROJECT_NAME}-{env}");
        let node_env = if profile.is_production() {
            "production"
        } else {
            "development"
        };
        let environment = BTreeMap::from([
            ("NODE_ENV".to_string(), node_env.to_string()),
            ("PUBLIC_ENVIRONMENT".to_string(), env.to_string()),
        ]);
        Self {
            id: SERVICE_ID.to_string(),
            service_name: name.clone(),
            image: ImageSource {
                repository: name,
                tag: IMAGE_TAG.to_string(),
                repository_removal: RemovalPolicy::for_profile(profile),
                pull_role_grant: IMAGE_PULL_GRANT.to_string(),
            },
            port: SERVICE_PORT,
            environment,
            auto_deployments: true,
            url_export: format!("{env}-ServiceUrl"),
        }
    }

    /// Image reference in `repository:tag` form.
    #[must_use]
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.image.repository, self.image.tag)
    }
}
