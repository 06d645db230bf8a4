//! Application context: unified state passed to every command handler.

use crate::domain::RenderFormat;
use crate::output::OutputContext;

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Force JSON output regardless of `--format`.
    pub json: bool,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext`.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Whether the global `--json` flag was given.
    pub json: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &OutputFlags) -> Self {
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            json: flags.json,
        }
    }

    /// The format a command should write, given its own `--format` value.
    #[must_use]
    pub fn format(&self, requested: RenderFormat) -> RenderFormat {
        requested.with_json_flag(self.json)
    }
}
