//! Application layer: port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain` and `sitestack_topology`,
//! never on `crate::infra`, `crate::commands`, or `crate::output`.

pub mod ports;
pub mod services;

pub use ports::{EnvironmentTableSource, ProgressReporter};
