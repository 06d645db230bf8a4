//! sitestack - plan per-environment web hosting topologies

use clap::Parser;
use sitestack_cli::cli::Cli;
use sitestack_cli::output::json::{error_code, format_error};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    if let Err(e) = cli.run() {
        let message = format!("{e:#}");
        match format_error(&message, error_code(&e)) {
            Ok(body) if json => println!("{body}"),
            _ => eprintln!("Error: {message}"),
        }
        std::process::exit(1);
    }
}
