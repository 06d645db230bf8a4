//! Version command

use crate::app::AppContext;
use crate::output::HumanRenderer;

/// Run the version command.
pub fn run(app: &AppContext) {
    let version = env!("CARGO_PKG_VERSION");

    if app.json {
        println!(r#"{{"version":"{version}"}}"#);
    } else {
        HumanRenderer::new(&app.output).render_version(version);
    }
}
