//! Machine-readable error reporting for `--json` runs.

use anyhow::{Context, Result};
use sitestack_topology::TopologyError;

/// Code for failures that carry no [`TopologyError`].
pub const GENERIC_ERROR_CODE: &str = "ERROR";

/// `{"error": true, "message": ..., "code": ...}`, pretty-printed.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Code of the first [`TopologyError`] in the chain of `err`.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<TopologyError>())
        .map_or(GENERIC_ERROR_CODE, TopologyError::code)
}
