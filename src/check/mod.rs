//! The audit pipeline.
//!
//! Each pass is a [`Check`] that reads a shared [`CheckContext`] and
//! returns a [`Report`]. The [`CheckRegistry`] holds the passes in run
//! order and [`run_checks`] drives them:
//!
//! schema completeness → build reconciliation → CMake linkage → runtime
//! tools → workflows → packager keys → resolver tool → shellcheck
//!
//! # Example
//!
//! ```
//! use depaudit::check::{Level, Report};
//!
//! let mut report = Report::new();
//! report.section("runtime: tools checks");
//! report.note("runtime.tools not referenced in scripts: widget");
//! assert!(report.passed());
//! assert_eq!(report.count(Level::Note), 1);
//! ```

pub mod checks;
pub mod context;
pub mod output;
pub mod registry;
pub mod report;
pub mod rule;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{CheckContext, CheckOptions, InstallerFacts, ProjectData};
pub use output::{HumanFormatter, JsonFormatter, OutputFormat, ReportFormatter};
pub use registry::CheckRegistry;
pub use report::{Entry, Level, Report};
pub use rule::{Check, CheckId};
pub use runner::{add_verdict, run_checks, STRUCTURE_OK, VERDICT_FAILED, VERDICT_OK};
