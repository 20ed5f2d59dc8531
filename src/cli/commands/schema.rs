//! Schema command implementation.
//!
//! The `depaudit schema` command prints the JSON Schema of a data
//! document, for editor completion and external validation.

use std::io::Write;

use schemars::schema_for;

use crate::cli::args::{SchemaArgs, SchemaDocument};
use crate::deps::{DependencyMap, DependencyMeta, DependencySpec};
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand {
    args: SchemaArgs,
}

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new(args: SchemaArgs) -> Self {
        Self { args }
    }
}

impl Command for SchemaCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let schema = match self.args.document {
            SchemaDocument::Deps => schema_for!(DependencySpec),
            SchemaDocument::Map => schema_for!(DependencyMap),
            SchemaDocument::Meta => schema_for!(DependencyMeta),
        };
        serde_json::to_writer_pretty(&mut *out, &schema).map_err(anyhow::Error::from)?;
        writeln!(out)?;
        Ok(CommandResult::success())
    }
}
