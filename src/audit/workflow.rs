//! CI workflow cross-check against `deps-meta.yaml`.
//!
//! Steps that invoke a `ci/deps/*packages*.sh` installer must pass every
//! flag and environment variable the script declares as required, and a
//! `--distro-family` value must be one the data knows about.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use super::tokens::read_lossy;
use crate::deps::DependencyMeta;

static SCRIPT_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(ci/deps/\S*packages\S*\.sh)").unwrap());

static DISTRO_FAMILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--distro-family\s+(\S+)").unwrap());

/// Flag whose value is checked against known families.
pub const DISTRO_FAMILY_FLAG: &str = "--distro-family";

/// One observation about a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowFinding {
    MissingFlag {
        workflow: String,
        script: String,
        flag: String,
    },
    MissingEnv {
        workflow: String,
        script: String,
        env: String,
    },
    /// Not in the script's `accepts.family` list.
    UnsupportedFamily { workflow: String, family: String },
    /// Not a `build` key of the client document.
    UnknownFamily { workflow: String, family: String },
    KnownFamily { workflow: String, family: String },
    Unreadable { workflow: String, message: String },
}

impl WorkflowFinding {
    pub fn is_error(&self) -> bool {
        !matches!(self, WorkflowFinding::KnownFamily { .. })
    }
}

impl fmt::Display for WorkflowFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowFinding::MissingFlag {
                workflow,
                script,
                flag,
            } => write!(f, "{workflow} runs {script} without {flag}"),
            WorkflowFinding::MissingEnv {
                workflow,
                script,
                env,
            } => write!(f, "{workflow} runs {script} without {env} in env"),
            WorkflowFinding::UnsupportedFamily { workflow, family } => {
                write!(f, "{workflow} uses unsupported distro-family '{family}'")
            }
            WorkflowFinding::UnknownFamily { workflow, family } => {
                write!(f, "{workflow} uses distro-family '{family}' not present in YAML")
            }
            WorkflowFinding::KnownFamily { workflow, family } => {
                write!(f, "{workflow} uses known distro-family '{family}'")
            }
            WorkflowFinding::Unreadable { workflow, message } => {
                write!(f, "{workflow} could not be read: {message}")
            }
        }
    }
}

/// `*.yml` files directly inside `dir`, sorted. A missing directory has none.
pub fn workflow_files(dir: &Path) -> Vec<PathBuf> {
    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join("*.yml");
    let Ok(paths) = glob::glob(&pattern.to_string_lossy()) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = paths.filter_map(std::result::Result::ok).collect();
    files.sort();
    files
}

/// `run` bodies of steps that call a package installer.
pub fn package_steps(workflow: &Value) -> Vec<String> {
    let Some(jobs) = workflow.get("jobs").and_then(Value::as_mapping) else {
        return Vec::new();
    };
    jobs.values()
        .filter_map(|job| job.get("steps").and_then(Value::as_sequence))
        .flatten()
        .filter_map(|step| step.get("run").and_then(Value::as_str))
        .filter(|run| run.contains("ci/deps/") && run.contains("packages"))
        .map(str::to_string)
        .collect()
}

/// Root-relative installer path referenced by a `run` body.
pub fn script_reference(run: &str) -> Option<&str> {
    SCRIPT_REF.captures(run).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// First `--distro-family <value>` in the workflow text, unquoted.
pub fn distro_family(text: &str) -> Option<String> {
    let caps = DISTRO_FAMILY.captures(text)?;
    let value = caps[1].trim_matches(|c| c == '"' || c == '\'');
    (!value.is_empty()).then(|| value.to_string())
}

/// Inputs shared by every workflow audit in a run.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowContext<'a> {
    pub root: &'a Path,
    pub meta: &'a DependencyMeta,
    /// `build` keys of the client document.
    pub families: &'a BTreeSet<String>,
}

/// Audit one workflow given its display name and raw text.
///
/// Unparsable workflows yield nothing. Referenced scripts that do not
/// exist under the root are skipped; each script is audited once per
/// workflow.
pub fn audit_workflow(ctx: &WorkflowContext<'_>, name: &str, text: &str) -> Vec<WorkflowFinding> {
    let workflow: Value = match serde_yaml::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Skipping unparsable workflow {}: {}", name, e);
            return Vec::new();
        }
    };

    let mut findings = Vec::new();
    let mut seen = BTreeSet::new();
    for run in package_steps(&workflow) {
        let Some(reference) = script_reference(&run) else {
            continue;
        };
        if !seen.insert(reference.to_string()) {
            continue;
        }
        let script_path = ctx.root.join(reference);
        if !script_path.exists() {
            tracing::debug!("{} references missing {}", name, reference);
            continue;
        }
        let script = script_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| reference.to_string());
        let contract = ctx.meta.scripts.get(reference).cloned().unwrap_or_default();

        for flag in &contract.requires_flags {
            if !text.contains(flag.as_str()) {
                findings.push(WorkflowFinding::MissingFlag {
                    workflow: name.to_string(),
                    script: script.clone(),
                    flag: flag.clone(),
                });
            }
        }
        for env in &contract.requires_env {
            if !text.contains(env.as_str()) {
                findings.push(WorkflowFinding::MissingEnv {
                    workflow: name.to_string(),
                    script: script.clone(),
                    env: env.clone(),
                });
            }
        }

        if !contract.requires_flags.iter().any(|f| f == DISTRO_FAMILY_FLAG) {
            continue;
        }
        let Some(family) = distro_family(text) else {
            continue;
        };
        let allowed = contract.accepts.get("family").map(Vec::as_slice).unwrap_or_default();
        let workflow = name.to_string();
        let finding = if !allowed.is_empty() && !allowed.contains(&family) {
            WorkflowFinding::UnsupportedFamily { workflow, family }
        } else if !ctx.families.contains(&family) {
            WorkflowFinding::UnknownFamily { workflow, family }
        } else {
            WorkflowFinding::KnownFamily { workflow, family }
        };
        findings.push(finding);
    }
    findings
}

/// Audit every workflow under `dir`, in file-name order.
///
/// Invalid UTF-8 is replaced; a file that cannot be read at all is an
/// [`WorkflowFinding::Unreadable`] finding.
pub fn audit_workflows(ctx: &WorkflowContext<'_>, dir: &Path) -> Vec<WorkflowFinding> {
    let mut findings = Vec::new();
    for path in workflow_files(dir) {
        let name = path
            .strip_prefix(ctx.root)
            .unwrap_or(&path)
            .display()
            .to_string();
        match read_lossy(&path) {
            Ok(text) => findings.extend(audit_workflow(ctx, &name, &text)),
            Err(e) => findings.push(WorkflowFinding::Unreadable {
                workflow: name,
                message: e.to_string(),
            }),
        }
    }
    findings
}
