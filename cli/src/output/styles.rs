//! Terminal stylesheet built on owo-colors.

use owo_colors::Style;

/// Styles for every kind of line the CLI prints. `Default` is plain text.
#[derive(Default, Clone, Copy)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub info: Style,
    /// Keys, arrows and other secondary text.
    pub dim: Style,
    pub header: Style,
    /// Routes served from the storage origin.
    pub storage: Style,
    /// Routes served from the compute-service origin.
    pub service: Style,
}

impl Styles {
    /// The colored stylesheet.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            info: Style::new().blue(),
            dim: Style::new().dimmed(),
            header: Style::new().bold().cyan(),
            storage: Style::new().truecolor(26, 151, 179),
            service: Style::new().truecolor(37, 56, 144),
        }
    }
}
