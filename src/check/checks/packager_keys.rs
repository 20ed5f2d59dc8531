//! Package manager keys of BSD operating systems.

use std::collections::BTreeSet;

use crate::check::{Check, CheckContext, CheckId, Report};
use crate::error::Result;

pub struct PackagerKeysCheck;

impl Check for PackagerKeysCheck {
    fn id(&self) -> CheckId {
        CheckId::new("packager-keys")
    }

    fn name(&self) -> &str {
        "Packager Keys"
    }

    fn description(&self) -> &str {
        "Requires BSD packagers to be ones the BSD library understands"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Report> {
        let mut report = Report::new();
        report.section("packagers: key sanity");

        let settings = ctx.layout.settings();
        let library = settings
            .bsd_script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| settings.bsd_script.display().to_string());
        let bsd_os = ctx.installer.bsd_os_names();

        let unknown: BTreeSet<&String> = ctx
            .data
            .client
            .spec
            .build
            .values()
            .flat_map(|oses| oses.iter())
            .filter(|(os, _)| bsd_os.contains(&os.to_lowercase()))
            .flat_map(|(_, entry)| entry.packagers.keys())
            .filter(|pkgmgr| !settings.bsd_packagers.contains(*pkgmgr))
            .collect();

        if unknown.is_empty() {
            report.ok(format!("BSD packager keys align with {library}"));
        } else {
            let names: Vec<&str> = unknown.iter().map(|s| s.as_str()).collect();
            report.error(format!(
                "BSD packagers not supported by {library}: {}",
                names.join(", ")
            ));
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::testing::{render, run, NoSource, Project, CLIENT};

    const INSTALLER: &str = "case \"${OS_NAME}\" in\n  FreeBSD) PKG_MGR=\"pkg\" ;;\nesac\n";

    #[test]
    fn supported_keys_pass() {
        let project = Project::new();
        project.write("ci/deps/install-bsd-packages.sh", INSTALLER);
        let report = run(&PackagerKeysCheck, &project, &NoSource);
        assert!(report.passed());
        assert!(render(&report).contains("OK: BSD packager keys align with packages-bsd.sh"));
    }

    #[test]
    fn unsupported_keys_fail() {
        let project = Project::new();
        project.write("ci/deps/install-bsd-packages.sh", INSTALLER);
        project.write(
            "ci/deps/data/deps-client.yaml",
            &CLIENT.replace("        pkg:\n", "        ports:\n"),
        );
        let report = run(&PackagerKeysCheck, &project, &NoSource);
        assert!(!report.passed());
        assert!(render(&report).contains("ERROR: BSD packagers not supported by packages-bsd.sh: ports"));
    }
}
