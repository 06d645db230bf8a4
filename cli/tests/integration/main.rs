//! Integration tests for the sitestack CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.

mod cli_tests;
mod config_file;
mod render_command;
