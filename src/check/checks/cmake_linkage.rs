//! CMake linkage cross-check against the first Linux build combination.

use crate::audit::{extract_cmake_deps, read_lossy, unresolved_deps};
use crate::check::{Check, CheckContext, CheckId, Report};
use crate::deps::{resolve_for, BuildCombo};
use crate::error::Result;

pub struct CmakeLinkageCheck;

impl CmakeLinkageCheck {
    /// First client combination of a Linux family, in key order, whose
    /// resolved client list is not empty.
    fn reference_combo(ctx: &CheckContext<'_>) -> Option<(BuildCombo, Vec<String>)> {
        let linux = ctx.data.linux_families();
        let client = &ctx.data.client.spec;
        client
            .combinations()
            .into_iter()
            .filter(|combo| linux.contains(&combo.family))
            .map(|combo| {
                let packages = resolve_for(client.mandatory_libs(&combo), &ctx.data.map, &combo);
                (combo, packages)
            })
            .find(|(_, packages)| !packages.is_empty())
    }
}

impl Check for CmakeLinkageCheck {
    fn id(&self) -> CheckId {
        CheckId::new("cmake-linkage")
    }

    fn name(&self) -> &str {
        "CMake Linkage"
    }

    fn description(&self) -> &str {
        "Traces CMake find_* directives to declared packages"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Report> {
        let mut report = Report::new();
        report.section("build: CMake linkage checks");

        let dep_map = &ctx.data.map;
        let (client_packages, server_packages) = match Self::reference_combo(ctx) {
            Some((combo, client_packages)) => {
                tracing::debug!("CMake linkage reference is {}", combo);
                let server_packages =
                    resolve_for(ctx.data.server.spec.mandatory_libs(&combo), dep_map, &combo);
                (client_packages, server_packages)
            }
            None => (Vec::new(), Vec::new()),
        };

        let cmake = &ctx.layout.settings().cmake;
        for (label, file, packages) in [
            ("client", &cmake.client, client_packages),
            ("server", &cmake.server, server_packages),
        ] {
            let path = ctx.layout.path(file);
            if !path.exists() {
                report.note(format!("{label} CMake file {} not found", file.display()));
                continue;
            }
            let text = match read_lossy(&path) {
                Ok(text) => text,
                Err(e) => {
                    report.note(format!("{label} CMake file {} not readable: {e}", file.display()));
                    continue;
                }
            };
            let deps = extract_cmake_deps(&text);
            for dep in unresolved_deps(&deps, &packages, dep_map) {
                report.note(format!(
                    "{label} dependency '{dep}' not found in YAML package names"
                ));
            }
        }
        Ok(report)
    }
}
