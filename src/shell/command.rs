//! External process execution.
//!
//! Every collaborator (installer shell functions, the resolver tool,
//! shellcheck) is run synchronously to completion with its output buffered
//! in memory. There is no timeout.

use crate::error::{DepauditError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Non-blank stdout lines, trimmed.
    pub fn stdout_lines(&self) -> Vec<String> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Options for command execution.
///
/// Output is always captured.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,
}

impl CommandOptions {
    /// Run in `cwd`.
    pub fn captured_in(cwd: &Path) -> Self {
        Self {
            cwd: Some(cwd.to_path_buf()),
        }
    }
}

/// Render a program and its arguments for messages.
pub fn display_command(program: &str, args: &[String]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().cloned());
    parts.join(" ")
}

/// Run `program` with `args` and wait for it.
///
/// A program that cannot be started at all is an error; a program that
/// runs and exits non-zero is reported through [`CommandResult::success`].
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let rendered = display_command(program, args);
    tracing::debug!("Running: {}", rendered);

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().map_err(|e| DepauditError::CollaboratorFailed {
        command: rendered.clone(),
        message: e.to_string(),
    })?;

    let duration = start.elapsed();
    let result = CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration,
        success: output.status.success(),
    };

    tracing::debug!(
        "Finished in {:?} with exit code {:?}: {}",
        result.duration,
        result.exit_code,
        rendered
    );
    Ok(result)
}

/// Run a bash snippet as a login shell (`bash -lc`), capturing output.
pub fn execute_bash(script: &str, cwd: &Path) -> Result<CommandResult> {
    execute(
        "bash",
        &["-lc".to_string(), script.to_string()],
        &CommandOptions::captured_in(cwd),
    )
}

/// Whether `program --version` can be started and exits cleanly.
pub fn is_installed(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
