//! Check command implementation.
//!
//! The `depaudit check` command loads the dependency data and runs every
//! registered check against it.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::check::{
    add_verdict, run_checks, CheckContext, CheckOptions, CheckRegistry, HumanFormatter,
    JsonFormatter, OutputFormat, ProjectData, Report, ReportFormatter, STRUCTURE_OK,
};
use crate::cli::args::CheckArgs;
use crate::config::{load_layout, ProjectLayout};
use crate::deps::ShellPackageSource;
use crate::error::{DepauditError, Result};

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    settings_file: Option<PathBuf>,
    args: CheckArgs,
    use_color: bool,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(
        project_root: &Path,
        settings_file: Option<&Path>,
        args: CheckArgs,
        use_color: bool,
    ) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            settings_file: settings_file.map(Path::to_path_buf),
            args,
            use_color,
        }
    }

    fn write_report(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        match self.args.format {
            OutputFormat::Human => HumanFormatter::new(self.use_color).format(report, out)?,
            OutputFormat::Json => JsonFormatter::new().format(report, out)?,
        }
        Ok(())
    }

    fn source(layout: &ProjectLayout) -> ShellPackageSource {
        let settings = layout.settings();
        ShellPackageSource::new(
            layout.root(),
            settings.linux_scripts.clone(),
            &settings.bsd_script,
        )
    }
}

impl Command for CheckCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let layout = load_layout(&self.project_root, self.settings_file.as_deref())?;
        let mut report = Report::new();

        let missing: Vec<PathBuf> = layout
            .required_files()
            .into_iter()
            .filter(|path| !path.exists())
            .collect();
        if !missing.is_empty() {
            report.info("Missing required files:");
            for path in &missing {
                report.info(format!("  - {}", path.display()));
            }
            self.write_report(&report, out)?;
            return Ok(CommandResult::failure(2));
        }

        let data = match ProjectData::load(&layout) {
            Ok(data) => data,
            Err(e @ DepauditError::Structural { .. }) => {
                report.error(e.to_string());
                self.write_report(&report, out)?;
                return Ok(CommandResult::failure(e.exit_code().into()));
            }
            Err(e @ (DepauditError::InputNotFound { .. } | DepauditError::ParseError { .. })) => {
                report.info(e.to_string());
                self.write_report(&report, out)?;
                return Ok(CommandResult::failure(e.exit_code().into()));
            }
            Err(e) => return Err(e),
        };
        report.info(STRUCTURE_OK);

        let source = Self::source(&layout);
        let options = CheckOptions {
            skip_shellcheck: self.args.skip_shellcheck,
            skip_tool: self.args.skip_tool,
        };
        let ctx = CheckContext::new(&layout, &data, &source, options)?;
        report.merge(run_checks(&CheckRegistry::with_builtins(), &ctx)?);
        add_verdict(&mut report);
        self.write_report(&report, out)?;

        if report.passed() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::testing::{Project, CLIENT};
    use tempfile::TempDir;

    fn run(root: &Path, args: CheckArgs) -> (CommandResult, String) {
        let cmd = CheckCommand::new(root, None, args, false);
        let mut out = Vec::new();
        let result = cmd.execute(&mut out).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    fn offline() -> CheckArgs {
        CheckArgs {
            skip_shellcheck: true,
            skip_tool: true,
            ..Default::default()
        }
    }

    #[test]
    fn missing_files_exit_with_two() {
        let temp = TempDir::new().unwrap();
        let (result, output) = run(temp.path(), offline());
        assert_eq!(result.exit_code, 2);
        assert!(output.starts_with("Missing required files:\n  - "));
        assert!(output.contains("deps-localclient.yaml"));
    }

    #[test]
    fn structural_problem_exits_with_one() {
        let project = Project::new();
        project.write(
            "ci/deps/data/deps-server.yaml",
            &CLIENT.replace("  tools:\n    mandatory: [fping]\n", ""),
        );
        let (result, output) = run(project.root(), offline());
        assert_eq!(result.exit_code, 1);
        assert!(output.starts_with("ERROR: "));
        assert!(output.trim_end().ends_with("missing runtime.tools"));
    }

    #[test]
    fn invalid_yaml_exits_with_two() {
        let project = Project::new();
        project.write("ci/deps/data/deps-client.yaml", "build: [unclosed");
        let (result, output) = run(project.root(), offline());
        assert_eq!(result.exit_code, 2);
        assert!(output.starts_with("Invalid YAML: "));
    }

    #[test]
    fn json_format_is_parseable() {
        let project = Project::new();
        let args = CheckArgs {
            format: OutputFormat::Json,
            ..offline()
        };
        let (_, output) = run(project.root(), args);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["entries"][0]["message"], STRUCTURE_OK);
    }

    #[test]
    fn non_utf8_cmake_file_keeps_the_report() {
        let project = Project::new();
        let path = project.root().join("client/CMakeLists.txt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"# Copyright \xe9\nfind_package(FOO)\n").unwrap();
        let (_, output) = run(project.root(), offline());
        assert!(output.starts_with(STRUCTURE_OK));
        assert!(output.contains("-- build debian ubuntu_24.04 apt client (linux)"));
        assert!(output.contains("-- build: CMake linkage checks"));
    }

    #[test]
    fn numeric_os_keys_are_not_parse_errors() {
        let project = Project::new();
        for name in ["deps-client.yaml", "deps-localclient.yaml", "deps-server.yaml"] {
            project.write(
                &format!("ci/deps/data/{name}"),
                &CLIENT.replace("ubuntu_24.04:", "12:"),
            );
        }
        let (result, output) = run(project.root(), offline());
        assert_ne!(result.exit_code, 2, "{output}");
        assert!(output.starts_with(STRUCTURE_OK));
        assert!(output.contains("-- build debian 12 apt client (linux)"));
    }
}
