//! Envs command: list the environment table.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::EnvironmentTableSource as _;
use crate::application::services::topology::list_environments;
use crate::commands::print_document;
use crate::domain::RenderFormat;
use crate::infra::table_store::YamlTableSource;
use crate::output::HumanRenderer;

/// Arguments for the envs command.
#[derive(Args, Debug)]
pub struct EnvsArgs {
    /// Environment table file (YAML)
    #[arg(short, long, env = "SITESTACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: RenderFormat,
}

/// Run the envs command.
///
/// # Errors
///
/// Returns an error if the table cannot be loaded.
pub fn run(app: &AppContext, args: &EnvsArgs) -> Result<()> {
    let source = YamlTableSource::new(args.config.clone());
    let profiles = list_environments(&source)?;
    match app.format(args.format) {
        RenderFormat::Human => {
            HumanRenderer::new(&app.output).render_environments(&profiles, &source.describe());
            Ok(())
        }
        format => print_document(&profiles, format),
    }
}
