//! Declared build packages against the installer libraries.
//!
//! For every client build combination the resolved `libs.mandatory` of
//! both variants is reconciled with the candidate sets the installer
//! shell functions produce. BSD operating systems must also list the
//! package manager their installer selects.

use crate::check::{Check, CheckContext, CheckId, Report};
use crate::deps::installer::package_manager_for;
use crate::deps::{
    include_if_declared, resolve_for, BuildCombo, ExpectedSetGenerator, PackageQuery, Platform,
    Reconciliation, Variant,
};
use crate::error::Result;

pub struct BuildPackagesCheck;

impl BuildPackagesCheck {
    fn platform_for(ctx: &CheckContext<'_>, combo: &BuildCombo) -> Option<Platform> {
        if ctx.data.linux_families().contains(&combo.family) {
            Some(Platform::Linux)
        } else if ctx.layout.settings().bsd_packagers.contains(&combo.pkgmgr) {
            Some(Platform::Bsd)
        } else {
            None
        }
    }

    fn check_bsd_manager(ctx: &CheckContext<'_>, os: &str, packagers: Vec<&String>, report: &mut Report) {
        let Some(expected) = package_manager_for(&ctx.installer.bsd_package_managers, os) else {
            return;
        };
        if packagers.iter().any(|p| p.as_str() == expected) {
            return;
        }
        let found = if packagers.is_empty() {
            "none".to_string()
        } else {
            packagers
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        report.error(format!(
            "{os} packagers missing expected '{expected}' (found: {found})"
        ));
    }
}

impl Check for BuildPackagesCheck {
    fn id(&self) -> CheckId {
        CheckId::new("build-packages")
    }

    fn name(&self) -> &str {
        "Build Packages"
    }

    fn description(&self) -> &str {
        "Reconciles declared build packages with the installer scripts"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Report> {
        let mut report = Report::new();
        let client = &ctx.data.client.spec;
        let server = &ctx.data.server.spec;
        let dep_map = &ctx.data.map;
        let ldap_package = &ctx.layout.settings().directory_service_package;
        let mut generator = ExpectedSetGenerator::new(ctx.source);

        for (family, oses) in &client.build {
            for (os, entry) in oses {
                Self::check_bsd_manager(ctx, os, entry.packagers.keys().collect(), &mut report);

                for pkgmgr in entry.packagers.keys() {
                    let combo = BuildCombo::new(family, os, pkgmgr);
                    let label = format!("build {combo}");
                    let Some(platform) = Self::platform_for(ctx, &combo) else {
                        report.section(format!(
                            "NOTE: build: no package-script expectations for {label}"
                        ));
                        continue;
                    };

                    let declared = [
                        (Variant::Client, resolve_for(client.mandatory_libs(&combo), dep_map, &combo)),
                        (Variant::Server, resolve_for(server.mandatory_libs(&combo), dep_map, &combo)),
                    ];
                    for (variant, actual) in declared {
                        let label = format!("{label} {variant} ({})", platform.as_str());
                        let query = PackageQuery {
                            platform,
                            combo: combo.clone(),
                            variant,
                        };
                        let mut candidates: Vec<Vec<String>> = match generator.candidates(&query) {
                            Ok(found) => found.into_iter().map(|c| c.packages).collect(),
                            Err(e) => {
                                report.section(label);
                                report.error(e.to_string());
                                continue;
                            }
                        };
                        if platform == Platform::Bsd
                            && variant == Variant::Server
                            && ctx.installer.mentions_directory_service
                        {
                            include_if_declared(&mut candidates, &actual, ldap_package);
                        }
                        report.reconciliation(&Reconciliation::compute(label, &actual, &candidates));
                    }
                }
            }
        }
        tracing::debug!("{} installer answers cached", generator.cached());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::testing::{list, render, run, FakeSource, Project, CLIENT};
    use crate::deps::{Flag, FlagSet};
    use crate::error::DepauditError;

    const INSTALLER: &str = "case \"${OS_NAME}\" in\n  freebsd) PKG_MGR=\"pkg\" ;;\nesac\npkg install openldap-client\n";

    #[test]
    fn matching_sets_pass() {
        let project = Project::new();
        let source = FakeSource::new(|_, _| Ok(list(&["FOO"])));
        let report = run(&BuildPackagesCheck, &project, &source);
        assert!(report.passed());
        let text = render(&report);
        assert!(text.contains("-- build debian ubuntu_24.04 apt client (linux)\n   expected: FOO\n   actual:   FOO\n"));
        assert!(text.contains("-- build bsd freebsd pkg server (bsd)"));
    }

    #[test]
    fn mismatch_reports_missing_and_extra() {
        let project = Project::new();
        let source = FakeSource::new(|_, _| Ok(list(&["BAR"])));
        let report = run(&BuildPackagesCheck, &project, &source);
        assert!(!report.passed());
        let text = render(&report);
        assert!(text.contains("   MISSING:  BAR\n   EXTRA:    FOO\n"));
    }

    #[test]
    fn any_flag_combination_may_match() {
        let project = Project::new();
        let source = FakeSource::new(|_, flags: &FlagSet| {
            Ok(match flags.snmp {
                Flag::On => list(&["FOO", "SNMP"]),
                Flag::Off => list(&["FOO"]),
            })
        });
        assert!(run(&BuildPackagesCheck, &project, &source).passed());
    }

    #[test]
    fn mapped_tokens_are_resolved_first() {
        let project = Project::new();
        project.write(
            "ci/deps/data/deps-map.yaml",
            "map:\n  FOO:\n    debian:\n      ubuntu_24.04:\n        apt: [libfoo-dev]\n",
        );
        let source = FakeSource::new(|q: &PackageQuery, _| {
            Ok(if q.platform == Platform::Linux {
                list(&["libfoo-dev"])
            } else {
                list(&["FOO"])
            })
        });
        assert!(run(&BuildPackagesCheck, &project, &source).passed());
    }

    #[test]
    fn collaborator_failure_is_an_error_and_run_continues() {
        let project = Project::new();
        let source = FakeSource::new(|q: &PackageQuery, _| {
            if q.platform == Platform::Bsd {
                Err(DepauditError::CollaboratorFailed {
                    command: "ci_bsd_packages".into(),
                    message: "exit code Some(1)".into(),
                })
            } else {
                Ok(list(&["FOO"]))
            }
        });
        let report = run(&BuildPackagesCheck, &project, &source);
        assert!(!report.passed());
        let text = render(&report);
        assert!(text.contains("ERROR: Failed to run ci_bsd_packages"));
        assert!(text.contains("-- build debian ubuntu_24.04 apt server (linux)"));
    }

    #[test]
    fn unknown_packager_gets_a_note() {
        let project = Project::new();
        let doc = CLIENT.replace("        pkg:\n", "        ports:\n");
        project.write("ci/deps/data/deps-client.yaml", &doc);
        let source = FakeSource::new(|_, _| Ok(list(&["FOO"])));
        let report = run(&BuildPackagesCheck, &project, &source);
        assert!(report.passed());
        assert!(render(&report)
            .contains("-- NOTE: build: no package-script expectations for build bsd freebsd ports\n"));
    }

    #[test]
    fn bsd_os_must_list_installer_manager() {
        let project = Project::new();
        project.write("ci/deps/install-bsd-packages.sh", INSTALLER);
        let doc = CLIENT.replace("        pkg:\n", "        pkgin:\n");
        project.write("ci/deps/data/deps-client.yaml", &doc);
        let source = FakeSource::new(|_, _| Ok(list(&["FOO"])));
        let report = run(&BuildPackagesCheck, &project, &source);
        assert!(!report.passed());
        assert!(render(&report).contains("ERROR: freebsd packagers missing expected 'pkg' (found: pkgin)"));
    }

    #[test]
    fn bsd_server_tolerates_declared_directory_service() {
        let project = Project::new();
        project.write("ci/deps/install-bsd-packages.sh", INSTALLER);
        let server = CLIENT.replace(
            "          libs:\n            mandatory: [FOO]\n          tools: {}\n",
            "          libs:\n            mandatory: [FOO, openldap-client]\n          tools: {}\n",
        );
        project.write("ci/deps/data/deps-server.yaml", &server);
        let source = FakeSource::new(|_, _| Ok(list(&["FOO"])));
        let report = run(&BuildPackagesCheck, &project, &source);
        assert!(report.passed(), "{}", render(&report));
    }
}
