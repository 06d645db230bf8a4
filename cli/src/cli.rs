//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::commands;

/// Plan the web hosting topology for a deployment environment
#[derive(Parser)]
#[command(
    name = "sitestack",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve an environment and show what will be declared
    Plan(commands::plan::PlanArgs),

    /// Assemble the full declaration graph
    Render(commands::render::RenderArgs),

    /// Show the named outputs of an assembled topology
    Outputs(commands::render::RenderArgs),

    /// List configured environments
    Envs(commands::envs::EnvsArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
        } = self;
        let app = AppContext::new(&OutputFlags {
            no_color,
            quiet,
            json,
        });
        match command {
            Command::Plan(args) => commands::plan::run(&app, &args),
            Command::Render(args) => commands::render::run(&app, &args),
            Command::Outputs(args) => commands::outputs::run(&app, &args),
            Command::Envs(args) => commands::envs::run(&app, &args),
            Command::Version => {
                commands::version::run(&app);
                Ok(())
            }
        }
    }
}
