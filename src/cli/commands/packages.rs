//! Packages command implementation.
//!
//! The `depaudit packages` command prints the resolved package names for
//! one build combination, one per line.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::PackagesArgs;
use crate::config::{load_document, load_layout, load_optional};
use crate::deps::{normalize_switch, select_packages, DependencyMap, PackageRequest};
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

/// The packages command implementation.
pub struct PackagesCommand {
    project_root: PathBuf,
    settings_file: Option<PathBuf>,
    args: PackagesArgs,
}

impl PackagesCommand {
    /// Create a new packages command.
    pub fn new(project_root: &Path, settings_file: Option<&Path>, args: PackagesArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            settings_file: settings_file.map(Path::to_path_buf),
            args,
        }
    }

    fn request(&self) -> PackageRequest {
        PackageRequest {
            variant: self.args.variant,
            family: self.args.family.clone(),
            os: self.args.os.clone(),
            pkgmgr: self.args.pkgmgr.clone(),
            enable_ldap: normalize_switch(self.args.enable_ldap.as_deref(), "OFF"),
            enable_snmp: normalize_switch(self.args.enable_snmp.as_deref(), "OFF"),
        }
    }
}

impl Command for PackagesCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let layout = load_layout(&self.project_root, self.settings_file.as_deref())?;
        let doc = load_document(&layout.deps_file(self.args.variant))?;
        let dep_map: DependencyMap = load_optional(&layout.map_file())?;

        for package in select_packages(&doc.spec, &dep_map, &self.request())? {
            writeln!(out, "{package}")?;
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::testing::Project;
    use crate::deps::Variant;
    use crate::error::DepauditError;

    fn args(variant: Variant, os: &str) -> PackagesArgs {
        PackagesArgs {
            variant,
            family: "debian".into(),
            os: os.into(),
            pkgmgr: "apt".into(),
            enable_ldap: None,
            enable_snmp: Some("yes".into()),
        }
    }

    #[test]
    fn prints_resolved_packages() {
        let project = Project::new();
        project.write(
            "ci/deps/data/deps-map.yaml",
            "map:\n  FOO:\n    debian:\n      ubuntu_24.04:\n        apt: [libfoo-dev, foo-tools]\n",
        );
        let cmd = PackagesCommand::new(project.root(), None, args(Variant::Client, "ubuntu_24.04"));
        let mut out = Vec::new();
        let result = cmd.execute(&mut out).unwrap();
        assert!(result.success);
        assert_eq!(String::from_utf8(out).unwrap(), "libfoo-dev\nfoo-tools\n");
    }

    #[test]
    fn unknown_combination_is_structural() {
        let project = Project::new();
        let cmd = PackagesCommand::new(project.root(), None, args(Variant::Server, "debian_12"));
        let err = cmd.execute(&mut Vec::new()).unwrap_err();
        assert!(matches!(err, DepauditError::Structural { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
