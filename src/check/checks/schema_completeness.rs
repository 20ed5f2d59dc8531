//! Completeness of the client and server documents.
//!
//! Stricter than load-time validation: every packager must also carry a
//! `tools` block. A gap here ends the run.

use crate::check::{Check, CheckContext, CheckId, Report};
use crate::deps::schema::check_completeness;
use crate::error::{DepauditError, Result};

pub struct SchemaCompletenessCheck;

impl Check for SchemaCompletenessCheck {
    fn id(&self) -> CheckId {
        CheckId::new("schema-completeness")
    }

    fn name(&self) -> &str {
        "Schema Completeness"
    }

    fn description(&self) -> &str {
        "Requires libs, tools and libs.mandatory for every packager"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Report> {
        let mut report = Report::new();
        report.section("schema: completeness");
        for (name, doc) in ctx.data.audited() {
            match check_completeness(name, &doc.raw) {
                Ok(()) => report.ok(format!("{name} schema")),
                Err(DepauditError::Structural { message }) => {
                    report.halt(message);
                    break;
                }
                Err(other) => return Err(other),
            }
        }
        Ok(report)
    }
}
