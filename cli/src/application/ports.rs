//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `sitestack_topology` and never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use anyhow::Result;
use sitestack_topology::EnvironmentTable;

/// Supplies the environment table a build resolves against.
pub trait EnvironmentTableSource {
    /// Load the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read or parsed.
    fn load(&self) -> Result<EnvironmentTable>;

    /// Human-readable origin of the table, e.g. a file path or `built-in`.
    fn describe(&self) -> String;
}

/// Reports progress of a multi-step operation to the user.
pub trait ProgressReporter {
    /// Report a step in progress.
    fn step(&self, message: &str);
    /// Report successful completion of a step.
    fn success(&self, message: &str);
    /// Report a non-fatal warning.
    fn warn(&self, message: &str);
}
