//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: reading the environment
//! table from disk and reporting progress on stderr.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod reporter;
pub mod table_store;
