//! Outputs command

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::print_document;
use crate::commands::render::{RenderArgs, assemble};
use crate::domain::RenderFormat;
use crate::output::HumanRenderer;

/// Run the outputs command.
///
/// # Errors
///
/// Returns an error if assembly fails at any stage.
pub fn run(app: &AppContext, args: &RenderArgs) -> Result<()> {
    let format = app.format(args.format);
    let topology = assemble(app, args, format)?;
    match format {
        RenderFormat::Human => {
            HumanRenderer::new(&app.output).render_outputs(&topology.outputs);
            Ok(())
        }
        format => print_document(&topology.outputs, format),
    }
}
