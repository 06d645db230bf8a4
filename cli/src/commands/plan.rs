//! Plan command: declaration phase only.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::topology::declare_topology;
use crate::commands::{TargetArgs, print_document};
use crate::domain::RenderFormat;
use crate::infra::reporter::TracingReporter;
use crate::output::{HumanRenderer, TerminalReporter};

/// Arguments for the plan command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: RenderFormat,
}

/// Run the plan command.
///
/// # Errors
///
/// Returns an error if the table cannot be loaded or the environment is unknown.
pub fn run(app: &AppContext, args: &PlanArgs) -> Result<()> {
    let source = args.target.source();
    match app.format(args.format) {
        RenderFormat::Human => {
            let pending = declare_topology(
                &source,
                &args.target.env,
                &TerminalReporter::new(&app.output),
            )?;
            app.output.gap();
            HumanRenderer::new(&app.output).render_pending(&pending);
            Ok(())
        }
        format => {
            let pending = declare_topology(&source, &args.target.env, &TracingReporter)?;
            print_document(&pending, format)
        }
    }
}
