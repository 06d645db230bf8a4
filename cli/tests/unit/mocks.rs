//! Shared in-memory port implementations for unit tests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use anyhow::Result;
use sitestack_cli::application::ports::{EnvironmentTableSource, ProgressReporter};
use sitestack_topology::{EnvironmentProfile, EnvironmentTable};

/// Table held in memory.
pub struct InMemoryTable(pub EnvironmentTable);

impl InMemoryTable {
    pub fn builtin() -> Self {
        Self(EnvironmentTable::builtin())
    }

    /// A single `staging` environment on `example.org`.
    pub fn staging() -> Self {
        let mut envs = BTreeMap::new();
        envs.insert(
            "staging".to_string(),
            EnvironmentProfile::new(
                "staging",
                "staging.example.org",
                "site-staging",
                "example.org",
                "Z2STAGING",
                vec!["staging".to_string(), "www.staging".to_string()],
            ),
        );
        Self(EnvironmentTable::new(envs))
    }
}

impl EnvironmentTableSource for InMemoryTable {
    fn load(&self) -> Result<EnvironmentTable> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

/// Source whose table can never be read.
pub struct UnreadableTable;

impl EnvironmentTableSource for UnreadableTable {
    fn load(&self) -> Result<EnvironmentTable> {
        anyhow::bail!("permission denied")
    }

    fn describe(&self) -> String {
        "/etc/sitestack/environments.yaml".to_string()
    }
}

/// Reporter that discards everything.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}

/// Reporter that records every event as `"<kind>: <message>"`.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events.borrow_mut().push(format!("step: {message}"));
    }

    fn success(&self, message: &str) {
        self.events.borrow_mut().push(format!("success: {message}"));
    }

    fn warn(&self, message: &str) {
        self.events.borrow_mut().push(format!("warn: {message}"));
    }
}
