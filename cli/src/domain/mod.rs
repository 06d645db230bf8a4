//! Domain layer: pure CLI-side types and conversions.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod format;
pub mod references;

pub use format::{RenderFormat, to_document};
pub use references::{ReferenceValues, collect_references};
