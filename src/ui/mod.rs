//! Terminal styling.

pub mod theme;

pub use theme::{should_use_colors, ReportTheme};
