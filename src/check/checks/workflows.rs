//! CI workflows that call the package installers.

use crate::audit::{audit_workflows, WorkflowContext};
use crate::check::{Check, CheckContext, CheckId, Report};
use crate::error::Result;

pub struct WorkflowsCheck;

impl Check for WorkflowsCheck {
    fn id(&self) -> CheckId {
        CheckId::new("workflows")
    }

    fn name(&self) -> &str {
        "Workflows"
    }

    fn description(&self) -> &str {
        "Checks installer flags, env and distro family in CI workflows"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Report> {
        let mut report = Report::new();
        report.section("workflows: install checks");

        let families = ctx.data.families();
        let audit = WorkflowContext {
            root: ctx.layout.root(),
            meta: &ctx.data.meta,
            families: &families,
        };
        for finding in audit_workflows(&audit, &ctx.layout.workflows_dir()) {
            if finding.is_error() {
                report.error(finding.to_string());
            } else {
                report.ok(finding.to_string());
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::testing::{render, run, NoSource, Project};

    const META: &str = "scripts:\n  ci/deps/install-debian-packages.sh:\n    requires_flags: [--distro-family]\n";

    fn project(args: &str) -> Project {
        let project = Project::new();
        project.write("ci/deps/data/deps-meta.yaml", META);
        project.write("ci/deps/install-debian-packages.sh", "#!/bin/sh\n");
        project.write(
            ".github/workflows/ci.yml",
            &format!("jobs:\n  build:\n    steps:\n      - run: ci/deps/install-debian-packages.sh {args}\n"),
        );
        project
    }

    #[test]
    fn missing_flag_fails() {
        let report = run(&WorkflowsCheck, &project("--variant client"), &NoSource);
        assert!(!report.passed());
        assert!(render(&report).contains(
            "ERROR: .github/workflows/ci.yml runs install-debian-packages.sh without --distro-family"
        ));
    }

    #[test]
    fn known_family_passes() {
        let report = run(&WorkflowsCheck, &project("--distro-family debian"), &NoSource);
        assert!(report.passed());
        assert!(render(&report).contains("OK: .github/workflows/ci.yml uses known distro-family 'debian'"));
    }

    #[test]
    fn family_absent_from_data_fails() {
        let report = run(&WorkflowsCheck, &project("--distro-family arch"), &NoSource);
        assert!(!report.passed());
        assert!(render(&report).contains("uses distro-family 'arch' not present in YAML"));
    }
}
