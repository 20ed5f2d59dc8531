//! Line-oriented terminal output.
//!
//! Section headers start with `-- `; `OK:`, `NOTE:`, `ERROR:` and detail
//! lines inside a section are indented by three spaces. Entries before the
//! first section, or after an unindented status line, are not indented.

use std::io::Write;

use super::ReportFormatter;
use crate::check::{Level, Report};
use crate::ui::ReportTheme;

const INDENT: &str = "   ";

/// Formats reports for human consumption.
pub struct HumanFormatter {
    theme: ReportTheme,
}

impl HumanFormatter {
    pub fn new(use_color: bool) -> Self {
        let theme = if use_color {
            ReportTheme::new()
        } else {
            ReportTheme::plain()
        };
        Self { theme }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write + ?Sized>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        let mut in_section = false;
        for entry in report.entries() {
            let indent = if in_section { INDENT } else { "" };
            let message = &entry.message;
            match entry.level {
                Level::Info => {
                    in_section = false;
                    writeln!(writer, "{}", self.theme.status.apply_to(message))?;
                }
                Level::Section => {
                    in_section = true;
                    writeln!(writer, "{}", self.theme.section.apply_to(format!("-- {message}")))?;
                }
                Level::Ok => {
                    writeln!(writer, "{indent}{} {message}", self.theme.ok.apply_to("OK:"))?
                }
                Level::Note => {
                    writeln!(writer, "{indent}{} {message}", self.theme.note.apply_to("NOTE:"))?
                }
                Level::Error => {
                    writeln!(writer, "{indent}{} {message}", self.theme.error.apply_to("ERROR:"))?
                }
                Level::Detail => {
                    writeln!(writer, "{INDENT}{}", self.theme.detail.apply_to(message))?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(report: &Report) -> String {
        let mut out = Vec::new();
        HumanFormatter::new(false).format(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn indents_inside_sections() {
        let mut report = Report::new();
        report.info("deps YAML structure OK");
        report.section("runtime: tools checks");
        report.note("runtime.tools not referenced in scripts: widget");
        report.detail("expected: a");
        report.info("deps checks FAILED");
        assert_eq!(
            render(&report),
            "deps YAML structure OK\n\
             -- runtime: tools checks\n   \
             NOTE: runtime.tools not referenced in scripts: widget\n   \
             expected: a\n\
             deps checks FAILED\n"
        );
    }

    #[test]
    fn top_level_error_is_not_indented() {
        let mut report = Report::new();
        report.error("ci/deps/data/deps-client.yaml missing runtime section");
        assert_eq!(
            render(&report),
            "ERROR: ci/deps/data/deps-client.yaml missing runtime section\n"
        );
    }
}
