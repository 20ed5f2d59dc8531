//! Ordered report entries produced by a check run.

use serde::Serialize;

use crate::deps::Reconciliation;

/// Kind of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Unindented status line.
    Info,
    /// `-- ` section header.
    Section,
    Ok,
    Note,
    Error,
    /// Indented continuation of the previous entry.
    Detail,
}

/// One line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub level: Level,
    pub message: String,
}

impl Entry {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Accumulated output of one or more checks.
///
/// Any [`Level::Error`] entry fails the report; notes never do. A halted
/// report stops the run after the check that produced it.
#[derive(Debug, Clone, Default)]
pub struct Report {
    entries: Vec<Entry>,
    failed: bool,
    halted: bool,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, level: Level, message: impl Into<String>) {
        self.entries.push(Entry::new(level, message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message);
    }

    pub fn section(&mut self, message: impl Into<String>) {
        self.push(Level::Section, message);
    }

    pub fn ok(&mut self, message: impl Into<String>) {
        self.push(Level::Ok, message);
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.push(Level::Note, message);
    }

    /// Record an error and fail the report.
    pub fn error(&mut self, message: impl Into<String>) {
        self.failed = true;
        self.push(Level::Error, message);
    }

    /// Record an error that ends the run.
    pub fn halt(&mut self, message: impl Into<String>) {
        self.halted = true;
        self.error(message);
    }

    pub fn detail(&mut self, message: impl Into<String>) {
        self.push(Level::Detail, message);
    }

    /// Expected/actual block for a reconciliation, followed by a second
    /// block with the differences when nothing matched.
    pub fn reconciliation(&mut self, rec: &Reconciliation) {
        self.comparison_block(rec);
        let Some(set_diff) = rec.diff.as_ref().filter(|d| !d.is_empty()) else {
            return;
        };
        self.failed = true;
        self.comparison_block(rec);
        if !set_diff.missing.is_empty() {
            self.detail(format!("MISSING:  {}", join(&set_diff.missing)));
        }
        if !set_diff.extra.is_empty() {
            self.detail(format!("EXTRA:    {}", join(&set_diff.extra)));
        }
    }

    fn comparison_block(&mut self, rec: &Reconciliation) {
        self.section(rec.label.clone());
        self.detail(format!("expected: {}", join(&rec.expected)));
        self.detail(format!("actual:   {}", join(&rec.actual)));
    }

    /// Append another report, keeping its failure state.
    pub fn merge(&mut self, other: Report) {
        self.failed |= other.failed;
        self.halted |= other.halted;
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn passed(&self) -> bool {
        !self.failed
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn count(&self, level: Level) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
