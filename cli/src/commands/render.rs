//! Render command: both phases, full declaration graph.

use anyhow::Result;
use clap::Args;
use sitestack_topology::Topology;

use crate::app::AppContext;
use crate::application::services::topology::assemble_topology;
use crate::commands::{ReferenceArgs, TargetArgs, print_document};
use crate::domain::{ReferenceValues, RenderFormat, collect_references};
use crate::infra::reporter::TracingReporter;
use crate::output::{HumanRenderer, TerminalReporter};

/// Arguments shared by the render and outputs commands.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub references: ReferenceArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: RenderFormat,
}

/// Assemble the topology, reporting progress in the style `format` calls for.
pub(crate) fn assemble(
    app: &AppContext,
    args: &RenderArgs,
    format: RenderFormat,
) -> Result<Topology> {
    let source = args.target.source();
    let refs = collect_references(&ReferenceValues::from(&args.references));
    if format == RenderFormat::Human {
        let topology = assemble_topology(
            &source,
            &args.target.env,
            &refs,
            &TerminalReporter::new(&app.output),
        )?;
        app.output.gap();
        Ok(topology)
    } else {
        assemble_topology(&source, &args.target.env, &refs, &TracingReporter)
    }
}

/// Run the render command.
///
/// # Errors
///
/// Returns an error if assembly fails at any stage.
pub fn run(app: &AppContext, args: &RenderArgs) -> Result<()> {
    let format = app.format(args.format);
    let topology = assemble(app, args, format)?;
    match format {
        RenderFormat::Human => {
            HumanRenderer::new(&app.output).render_topology(&topology);
            Ok(())
        }
        format => print_document(&topology, format),
    }
}
