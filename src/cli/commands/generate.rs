//! Generate command implementation.
//!
//! The `depaudit generate` command renders the bash lookup tables from the
//! client and server documents and the map, then writes them or, with
//! `--check`, compares them with the file on disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::GenerateArgs;
use crate::config::{load_document, load_layout, load_optional};
use crate::deps::{render_tables, DependencyMap, Variant};
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

/// The generate command implementation.
pub struct GenerateCommand {
    project_root: PathBuf,
    settings_file: Option<PathBuf>,
    args: GenerateArgs,
}

impl GenerateCommand {
    /// Create a new generate command.
    pub fn new(project_root: &Path, settings_file: Option<&Path>, args: GenerateArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            settings_file: settings_file.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for GenerateCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let layout = load_layout(&self.project_root, self.settings_file.as_deref())?;
        let client = load_document(&layout.deps_file(Variant::Client))?;
        let server = load_document(&layout.deps_file(Variant::Server))?;
        let dep_map: DependencyMap = load_optional(&layout.map_file())?;
        let rendered = render_tables(&client.spec, &server.spec, &dep_map);

        let target = match &self.args.output {
            Some(path) => layout.path(path),
            None => layout.path(&layout.settings().generated_tables),
        };

        if self.args.check {
            let current = fs::read_to_string(&target).unwrap_or_default();
            if current == rendered {
                writeln!(out, "{} is up to date", target.display())?;
                return Ok(CommandResult::success());
            }
            writeln!(out, "{} is stale; run `depaudit generate`", target.display())?;
            return Ok(CommandResult::failure(1));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, rendered)?;
        tracing::debug!("Wrote {}", target.display());
        writeln!(out, "Wrote {}", target.display())?;
        Ok(CommandResult::success())
    }
}
