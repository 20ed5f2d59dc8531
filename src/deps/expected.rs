//! Expected package sets computed by the installer scripts.
//!
//! The installer shell libraries decide which packages to install from a
//! handful of feature flags. For each build combination every flag
//! combination is asked for its package list; each answer is one candidate
//! expected set for the [reconciler](super::reconcile).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::model::{BuildCombo, Variant};
use crate::config::LinuxScripts;
use crate::error::{DepauditError, Result};
use crate::shell::{execute_bash, CommandResult};

/// A feature switch as understood by the installer scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    On,
    Off,
}

impl Flag {
    /// Values tried for every switch, in order.
    pub const ALL: [Flag; 2] = [Flag::On, Flag::Off];

    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::On => "ON",
            Flag::Off => "OFF",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Installer code path for a build combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// `ci_linux_packages` with ldap and snmp switches.
    Linux,
    /// `ci_bsd_packages` with an snmp switch only.
    Bsd,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Bsd => "bsd",
        }
    }

    /// Every flag combination for this platform, ldap varying slowest.
    pub fn flag_sets(&self) -> Vec<FlagSet> {
        match self {
            Platform::Linux => Flag::ALL
                .iter()
                .flat_map(|&ldap| {
                    Flag::ALL.iter().map(move |&snmp| FlagSet {
                        ldap: Some(ldap),
                        snmp,
                    })
                })
                .collect(),
            Platform::Bsd => Flag::ALL
                .iter()
                .map(|&snmp| FlagSet { ldap: None, snmp })
                .collect(),
        }
    }
}

/// One combination of feature switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagSet {
    /// Not applicable on BSD.
    pub ldap: Option<Flag>,
    pub snmp: Flag,
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ldap {
            Some(ldap) => write!(f, "ldap={} snmp={}", ldap, self.snmp),
            None => write!(f, "snmp={}", self.snmp),
        }
    }
}

/// What to ask an installer library for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageQuery {
    pub platform: Platform,
    pub combo: BuildCombo,
    pub variant: Variant,
}

/// Anything that can report the packages an installer would select.
pub trait PackageSource {
    /// Package names for a query under one flag combination.
    ///
    /// An empty list is a valid answer. A collaborator that fails must
    /// return [`DepauditError::CollaboratorFailed`].
    fn packages(&self, query: &PackageQuery, flags: &FlagSet) -> Result<Vec<String>>;
}

/// One candidate expected set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub flags: FlagSet,
    pub packages: Vec<String>,
}

/// Generates candidate sets, caching answers for the lifetime of one pass.
pub struct ExpectedSetGenerator<'a> {
    source: &'a dyn PackageSource,
    cache: HashMap<(PackageQuery, FlagSet), Vec<String>>,
}

impl<'a> ExpectedSetGenerator<'a> {
    pub fn new(source: &'a dyn PackageSource) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Candidates for every flag combination of the query's platform.
    ///
    /// Stops at the first collaborator failure.
    pub fn candidates(&mut self, query: &PackageQuery) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();
        for flags in query.platform.flag_sets() {
            let key = (query.clone(), flags);
            let packages = match self.cache.get(&key) {
                Some(cached) => {
                    tracing::debug!("Cache hit for {} {} {}", query.combo, query.variant, flags);
                    cached.clone()
                }
                None => {
                    let fresh = self.source.packages(query, &flags)?;
                    self.cache.insert(key, fresh.clone());
                    fresh
                }
            };
            candidates.push(Candidate { flags, packages });
        }
        Ok(candidates)
    }

    /// Number of cached answers.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

/// Quote a value for a bash command line.
pub(crate) fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Split `ubuntu_24.04` into `("ubuntu", "24.04")`; no `_` means no version.
pub fn split_os(os: &str) -> (&str, &str) {
    os.split_once('_').unwrap_or((os, ""))
}

/// [`PackageSource`] backed by the project's installer shell libraries.
#[derive(Debug, Clone)]
pub struct ShellPackageSource {
    root: PathBuf,
    linux_scripts: LinuxScripts,
    bsd_script: PathBuf,
}

impl ShellPackageSource {
    /// Scripts are given relative to `root`.
    pub fn new(root: &Path, linux_scripts: LinuxScripts, bsd_script: impl Into<PathBuf>) -> Self {
        Self {
            root: root.to_path_buf(),
            linux_scripts,
            bsd_script: bsd_script.into(),
        }
    }

    /// The bash snippet run for a query.
    pub fn script_for(&self, query: &PackageQuery, flags: &FlagSet) -> String {
        let combo = &query.combo;
        let root = shell_quote(&self.root.display().to_string());
        match query.platform {
            Platform::Linux => {
                let script = self.linux_scripts.for_family(&combo.family);
                let (distro, version) = split_os(&combo.os);
                let ldap = flags.ldap.unwrap_or(Flag::Off);
                format!(
                    "cd {}; source {}; ci_linux_packages {} {} {} {} {} '' {}",
                    root,
                    shell_quote(&script.display().to_string()),
                    shell_quote(&combo.family),
                    shell_quote(distro),
                    shell_quote(version),
                    query.variant,
                    ldap,
                    flags.snmp
                )
            }
            Platform::Bsd => format!(
                "cd {}; source {}; ci_bsd_packages {} {} {} {}",
                root,
                shell_quote(&self.bsd_script.display().to_string()),
                shell_quote(&combo.pkgmgr),
                query.variant,
                flags.snmp,
                shell_quote(&combo.os)
            ),
        }
    }
}

fn failure(script: &str, result: &CommandResult) -> DepauditError {
    let mut message = format!("exit code {:?}", result.exit_code);
    let stderr = result.stderr.trim();
    if !stderr.is_empty() {
        message.push_str(": ");
        message.push_str(stderr);
    }
    DepauditError::CollaboratorFailed {
        command: format!("bash -lc \"{}\"", script),
        message,
    }
}

impl PackageSource for ShellPackageSource {
    fn packages(&self, query: &PackageQuery, flags: &FlagSet) -> Result<Vec<String>> {
        let script = self.script_for(query, flags);
        let result = execute_bash(&script, &self.root)?;
        if !result.success {
            return Err(failure(&script, &result));
        }
        Ok(result.stdout_lines())
    }
}
