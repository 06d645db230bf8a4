//! Topology rendering formats.
//!
//! Pure functions only: no I/O, no terminal access.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// How a topology description is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    /// Styled summary for terminals.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl RenderFormat {
    /// The effective format once the global `--json` flag is taken into account.
    #[must_use]
    pub fn with_json_flag(self, json: bool) -> Self {
        if json { Self::Json } else { self }
    }
}

/// Serializes `value` as a machine-readable document.
///
/// # Errors
///
/// Returns an error if `format` is [`RenderFormat::Human`] or serialization
/// fails.
pub fn to_document<T: Serialize>(value: &T, format: RenderFormat) -> Result<String> {
    match format {
        RenderFormat::Json => {
            serde_json::to_string_pretty(value).context("JSON serialization failed")
        }
        RenderFormat::Yaml => serde_yaml::to_string(value).context("YAML serialization failed"),
        RenderFormat::Human => anyhow::bail!("human output is not a document format"),
    }
}
