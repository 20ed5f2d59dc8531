//! Runs registered checks in order and adds the verdict.

use super::context::CheckContext;
use super::registry::CheckRegistry;
use super::report::Report;
use crate::error::Result;

/// Printed after "structure OK" once every document has loaded.
pub const STRUCTURE_OK: &str = "deps YAML structure OK";
pub const VERDICT_OK: &str = "deps content + CMake + runtime + workflow checks OK";
pub const VERDICT_FAILED: &str = "deps checks FAILED";

/// Run every check in `registry`, stopping after a halted report.
///
/// Failures inside a check never stop later checks; they only mark the
/// report as failed.
pub fn run_checks(registry: &CheckRegistry, ctx: &CheckContext<'_>) -> Result<Report> {
    let mut report = Report::new();
    for check in registry.iter() {
        tracing::debug!("Running check {} ({})", check.id(), check.name());
        report.merge(check.run(ctx)?);
        if report.halted() {
            tracing::debug!("Check {} halted the run", check.id());
            break;
        }
    }
    Ok(report)
}

/// Append the final verdict line.
pub fn add_verdict(report: &mut Report) {
    if report.passed() {
        report.info(VERDICT_OK);
    } else {
        report.info(VERDICT_FAILED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::testing::{list, render, run_with, FakeSource, Project, CLIENT};
    use crate::check::{CheckOptions, ProjectData};

    fn full_run(project: &Project, answer: &'static [&'static str]) -> Report {
        let layout = project.layout();
        let data = ProjectData::load(&layout).unwrap();
        let source = FakeSource::new(move |_, _| Ok(list(answer)));
        let options = CheckOptions {
            skip_shellcheck: true,
            skip_tool: true,
        };
        let ctx = CheckContext::new(&layout, &data, &source, options).unwrap();
        let mut report = run_checks(&CheckRegistry::with_builtins(), &ctx).unwrap();
        add_verdict(&mut report);
        report
    }

    #[test]
    fn consistent_project_passes_with_notes() {
        let project = Project::new();
        let report = full_run(&project, &["FOO"]);
        let text = render(&report);
        assert!(report.passed(), "{text}");
        assert!(text.contains("NOTE: runtime.tools not referenced in scripts: fping"));
        assert!(text.ends_with(&format!("{VERDICT_OK}\n")));
    }

    #[test]
    fn mismatch_fails_but_later_checks_run() {
        let project = Project::new();
        let report = full_run(&project, &["BAR"]);
        let text = render(&report);
        assert!(!report.passed());
        assert!(text.contains("-- shellcheck: local + CI helpers"));
        assert!(text.ends_with(&format!("{VERDICT_FAILED}\n")));
    }

    #[test]
    fn incomplete_schema_halts_before_build_checks() {
        let project = Project::new();
        project.write(
            "ci/deps/data/deps-client.yaml",
            &CLIENT.replace("          tools: {}\n", ""),
        );
        let report = full_run(&project, &["FOO"]);
        let text = render(&report);
        assert!(report.halted());
        assert!(!text.contains("-- build"));
        assert!(text.contains("ERROR: client missing libs/tools for bsd.freebsd.pkg"));
    }

    #[test]
    fn single_check_runs_alone() {
        let project = Project::new();
        let report = run_with(
            &crate::check::checks::RuntimeToolsCheck,
            &project,
            &FakeSource::new(|_, _| Ok(Vec::new())),
            CheckOptions::default(),
        );
        assert!(report.passed());
    }
}
