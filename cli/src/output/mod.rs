//! Terminal output: stylesheet, renderer and progress reporter.

pub mod human;
pub mod json;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::{OwoColorize as _, Style};

pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Where and how terminal output is written.
pub struct OutputContext {
    pub styles: Styles,
    /// Suppresses all stdout lines.
    pub quiet: bool,
}

impl OutputContext {
    /// Colors are used only on a terminal, and never with `no_color` or a
    /// non-empty `NO_COLOR`.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let colored = Term::stdout().is_term() && !no_color && !no_color_env();
        Self {
            styles: if colored { Styles::colored() } else { Styles::default() },
            quiet,
        }
    }

    fn symbol_line(&self, symbol: &str, style: Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", symbol.style(style));
        }
    }

    /// `✓ msg`
    pub fn success(&self, msg: &str) {
        self.symbol_line("✓", self.styles.success, msg);
    }

    /// `⚠ msg`
    pub fn warn(&self, msg: &str) {
        self.symbol_line("⚠", self.styles.warning, msg);
    }

    /// `ℹ msg`
    pub fn info(&self, msg: &str) {
        self.symbol_line("ℹ", self.styles.info, msg);
    }

    /// `→ msg`, for a step still in progress.
    pub fn step(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {}", "→".style(self.styles.info), msg.style(self.styles.dim));
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Dimmed key followed by its value.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }

    /// Blank separator line.
    pub fn gap(&self) {
        if !self.quiet {
            println!();
        }
    }
}

/// `NO_COLOR` disables color when set to anything but the empty string.
fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}
