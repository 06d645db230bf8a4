//! Command implementations

pub mod envs;
pub mod outputs;
pub mod plan;
pub mod render;
pub mod version;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use sitestack_topology::DEFAULT_ENVIRONMENT;

use crate::domain::{ReferenceValues, RenderFormat, to_document};
use crate::infra::table_store::YamlTableSource;

/// Which environment to build, and from which table.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Environment identifier to resolve
    #[arg(short, long, env = "SITESTACK_ENV", default_value = DEFAULT_ENVIRONMENT)]
    pub env: String,

    /// Environment table file (YAML)
    #[arg(short, long, env = "SITESTACK_CONFIG")]
    pub config: Option<PathBuf>,
}

impl TargetArgs {
    /// The table source these arguments select.
    #[must_use]
    pub fn source(&self) -> YamlTableSource {
        YamlTableSource::new(self.config.clone())
    }
}

/// Values reported by the provisioning engine after the first phase.
#[derive(Args, Debug, Clone, Default)]
pub struct ReferenceArgs {
    /// Network endpoint of the compute service (`host[:port]`)
    #[arg(long, env = "SITESTACK_SERVICE_ENDPOINT")]
    pub service_endpoint: Option<String>,

    /// Source identifier of the routing-layer instance
    #[arg(long, env = "SITESTACK_DISTRIBUTION_SOURCE")]
    pub distribution_source: Option<String>,

    /// Canonical domain name of the routing-layer instance
    #[arg(long, env = "SITESTACK_DISTRIBUTION_DOMAIN")]
    pub distribution_domain: Option<String>,
}

impl From<&ReferenceArgs> for ReferenceValues {
    fn from(args: &ReferenceArgs) -> Self {
        Self {
            service_endpoint: args.service_endpoint.clone(),
            distribution_source: args.distribution_source.clone(),
            distribution_domain: args.distribution_domain.clone(),
        }
    }
}

/// Write `value` to stdout as a JSON or YAML document.
fn print_document<T: Serialize>(value: &T, format: RenderFormat) -> Result<()> {
    let doc = to_document(value, format)?;
    println!("{}", doc.trim_end());
    Ok(())
}
