//! The project's per-platform resolver tool, run for every combination.

use crate::check::{Check, CheckContext, CheckId, Report};
use crate::deps::{DependencySpec, Variant};
use crate::error::Result;
use crate::shell::{execute, CommandOptions};

pub struct ResolverToolCheck;

impl ResolverToolCheck {
    fn run_variant(
        ctx: &CheckContext<'_>,
        variant: Variant,
        spec: &DependencySpec,
        tool: &str,
        report: &mut Report,
    ) -> Result<()> {
        let combos = spec.combinations();
        if combos.is_empty() {
            return Ok(());
        }
        let script = ctx.layout.path(&ctx.layout.settings().resolver_tool);
        if !script.exists() {
            report.error(format!("{tool} missing; cannot validate mappings"));
            return Ok(());
        }

        let program = script.to_string_lossy();
        let options = CommandOptions::captured_in(ctx.layout.root());
        for combo in combos {
            let args: Vec<String> = [
                "--variant",
                variant.as_str(),
                "--family",
                combo.family.as_str(),
                "--os",
                combo.os.as_str(),
                "--pkgmgr",
                combo.pkgmgr.as_str(),
                "--enable-ldap",
                "ON",
                "--enable-snmp",
                "ON",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect();

            let failure = format!(
                "{tool} failed for variant={variant} family={} os={} pkgmgr={}",
                combo.family, combo.os, combo.pkgmgr
            );
            match execute(&program, &args, &options) {
                Ok(result) if result.success => {}
                Ok(result) => {
                    report.error(failure);
                    let stdout = result.stdout.trim();
                    if !stdout.is_empty() {
                        report.detail(format!("   stdout: {stdout}"));
                    }
                    let stderr = result.stderr.trim();
                    if !stderr.is_empty() {
                        report.detail(format!("   stderr: {stderr}"));
                    }
                }
                Err(e) => {
                    report.error(failure);
                    report.detail(format!("   {e}"));
                }
            }
        }
        Ok(())
    }
}

impl Check for ResolverToolCheck {
    fn id(&self) -> CheckId {
        CheckId::new("resolver-tool")
    }

    fn name(&self) -> &str {
        "Resolver Tool"
    }

    fn description(&self) -> &str {
        "Runs the resolver tool for every client and server combination"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Report> {
        let mut report = Report::new();
        let resolver = &ctx.layout.settings().resolver_tool;
        let tool = resolver
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| resolver.display().to_string());
        let stem = tool.strip_suffix(".sh").unwrap_or(&tool);
        report.section(format!("{stem}: validation"));

        if ctx.options.skip_tool {
            report.note(format!("{tool} validation skipped"));
            return Ok(report);
        }

        Self::run_variant(ctx, Variant::Client, &ctx.data.client.spec, &tool, &mut report)?;
        Self::run_variant(ctx, Variant::Server, &ctx.data.server.spec, &tool, &mut report)?;
        Ok(report)
    }
}
