//! Visual theme for report output.

use console::Style;

/// Styles for each kind of report line.
#[derive(Debug, Clone)]
pub struct ReportTheme {
    /// `OK:` prefix (green).
    pub ok: Style,
    /// `NOTE:` prefix (orange).
    pub note: Style,
    /// `ERROR:` prefix (red bold).
    pub error: Style,
    /// `-- ` section headers (bold).
    pub section: Style,
    /// Expected/actual detail lines (dim).
    pub detail: Style,
    /// Final verdict and status lines (bold).
    pub status: Style,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportTheme {
    pub fn new() -> Self {
        Self {
            ok: Style::new().green(),
            note: Style::new().color256(208),
            error: Style::new().red().bold(),
            section: Style::new().bold(),
            detail: Style::new().dim(),
            status: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            ok: Style::new(),
            note: Style::new(),
            error: Style::new(),
            section: Style::new(),
            detail: Style::new(),
            status: Style::new(),
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_leaves_text_alone() {
        let theme = ReportTheme::plain();
        assert_eq!(theme.error.apply_to("ERROR:").to_string(), "ERROR:");
        assert_eq!(theme.section.apply_to("-- build").to_string(), "-- build");
    }
}
