//! shellcheck over the installer and helper scripts.

use crate::check::{Check, CheckContext, CheckId, Report};
use crate::error::Result;
use crate::shell::{execute, is_installed, CommandOptions};

const SHELLCHECK: &str = "shellcheck";

pub struct ShellcheckCheck;

impl Check for ShellcheckCheck {
    fn id(&self) -> CheckId {
        CheckId::new("shellcheck")
    }

    fn name(&self) -> &str {
        "Shellcheck"
    }

    fn description(&self) -> &str {
        "Lints the configured shell scripts with shellcheck"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Report> {
        let mut report = Report::new();
        report.section("shellcheck: local + CI helpers");

        if ctx.options.skip_shellcheck {
            report.note("shellcheck skipped");
            return Ok(report);
        }

        let scripts: Vec<String> = ctx
            .layout
            .settings()
            .shell_scripts
            .iter()
            .map(|relative| ctx.layout.path(relative))
            .filter(|path| path.exists())
            .map(|path| path.to_string_lossy().into_owned())
            .collect();
        if scripts.is_empty() {
            report.note("no shell scripts found for linting");
            return Ok(report);
        }
        if !is_installed(SHELLCHECK) {
            report.note("shellcheck not installed; skipping shell lint");
            return Ok(report);
        }

        let mut args: Vec<String> = ["--external-sources", "--shell", "bash"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        args.extend(scripts.iter().cloned());

        let result = execute(SHELLCHECK, &args, &CommandOptions::captured_in(ctx.layout.root()))?;
        if result.success {
            report.ok(format!("{} scripts clean", scripts.len()));
        } else {
            report.error("shellcheck reported issues");
            for line in result.stdout.lines().filter(|l| !l.trim().is_empty()) {
                report.detail(format!("   {line}"));
            }
        }
        Ok(report)
    }
}
