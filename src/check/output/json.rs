//! JSON output for tooling.

use std::io::Write;

use serde::Serialize;

use super::ReportFormatter;
use crate::check::{Entry, Level, Report};

/// Formats a report as a single JSON document.
#[derive(Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    passed: bool,
    entries: &'a [Entry],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    ok: usize,
    notes: usize,
    errors: usize,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write + ?Sized>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        let output = JsonOutput {
            passed: report.passed(),
            entries: report.entries(),
            summary: JsonSummary {
                ok: report.count(Level::Ok),
                notes: report.count(Level::Note),
                errors: report.count(Level::Error),
            },
        };
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_entries_and_summary() {
        let mut report = Report::new();
        report.section("packagers: key sanity");
        report.error("BSD packagers not supported by packages-bsd.sh: ports");

        let mut out = Vec::new();
        JsonFormatter::new().format(&report, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["passed"], false);
        assert_eq!(value["summary"]["errors"], 1);
        assert_eq!(value["entries"][0]["level"], "section");
        assert_eq!(value["entries"][1]["level"], "error");
    }
}
