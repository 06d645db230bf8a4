//! Infrastructure implementation of the `ProgressReporter` port.

use crate::application::ports::ProgressReporter;

/// Forwards progress to `tracing`, keeping stdout free for documents.
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn step(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn success(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
