//! Runtime tools referenced by the project's shell scripts.

use crate::audit::{runtime_tool_tokens, unreferenced_tools};
use crate::check::{Check, CheckContext, CheckId, Report};
use crate::error::Result;

pub struct RuntimeToolsCheck;

impl Check for RuntimeToolsCheck {
    fn id(&self) -> CheckId {
        CheckId::new("runtime-tools")
    }

    fn name(&self) -> &str {
        "Runtime Tools"
    }

    fn description(&self) -> &str {
        "Looks for every runtime tool in the project's shell scripts"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Report> {
        let mut report = Report::new();
        report.section("runtime: tools checks");

        let tokens = runtime_tool_tokens(ctx.data.audited().map(|(_, doc)| &doc.spec));
        let missing = unreferenced_tools(ctx.layout.root(), &tokens);
        if missing.is_empty() {
            report.ok("runtime tools referenced in scripts");
        } else {
            report.note(format!(
                "runtime.tools not referenced in scripts: {}",
                missing.join(", ")
            ));
        }
        Ok(report)
    }
}
