//! Project settings file (`.depaudit.yml`).
//!
//! Every field is optional. The defaults describe the conventional layout
//! of a project whose packaging data lives under `ci/deps/`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings loaded from `.depaudit.yml`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditSettings {
    /// Directory holding `deps-*.yaml`, `deps-map.yaml`, `deps-meta.yaml`.
    pub data_dir: PathBuf,

    /// Directory scanned for `*.yml` CI workflows.
    pub workflows_dir: PathBuf,

    /// CMake files scanned for dependency discovery directives.
    pub cmake: CmakeSettings,

    /// Scripts passed to shellcheck.
    pub shell_scripts: Vec<PathBuf>,

    /// Linux shell-function libraries.
    pub linux_scripts: LinuxScripts,

    /// BSD shell-function library.
    pub bsd_script: PathBuf,

    /// BSD installer parsed for its OS → package manager table.
    pub bsd_installer: PathBuf,

    /// Per-platform resolver tool.
    pub resolver_tool: PathBuf,

    /// Output of `depaudit generate`.
    pub generated_tables: PathBuf,

    /// Package managers `ci_bsd_packages` understands.
    pub bsd_packagers: Vec<String>,

    /// Directory-service package only matched on BSD when declared.
    pub directory_service_package: String,
}

/// CMake files for the client and server builds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmakeSettings {
    pub client: PathBuf,
    pub server: PathBuf,
}

/// Linux package scripts: one for the `debian` family, one for the rest.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinuxScripts {
    pub debian: PathBuf,
    pub default: PathBuf,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("ci/deps/data"),
            workflows_dir: PathBuf::from(".github/workflows"),
            cmake: CmakeSettings::default(),
            shell_scripts: [
                "cmake-local-setup.sh",
                "cmake-local-build.sh",
                "cmake-local-install.sh",
                "ci/deps/install-bsd-packages.sh",
                "ci/deps/install-debian-packages.sh",
                "ci/deps/install-gh-debian-packages.sh",
                "ci/deps/packages-bsd.sh",
                "ci/deps/packages-debian.sh",
                "ci/deps/packages-gh-debian.sh",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            linux_scripts: LinuxScripts::default(),
            bsd_script: PathBuf::from("ci/deps/packages-bsd.sh"),
            bsd_installer: PathBuf::from("ci/deps/install-bsd-packages.sh"),
            resolver_tool: PathBuf::from("ci/deps/packages-from-yaml.sh"),
            generated_tables: PathBuf::from("ci/deps/generated-packages.sh"),
            bsd_packagers: vec!["pkg".into(), "pkgin".into(), "pkg_add".into()],
            directory_service_package: "openldap-client".to_string(),
        }
    }
}

impl Default for CmakeSettings {
    fn default() -> Self {
        Self {
            client: PathBuf::from("client/CMakeLists.txt"),
            server: PathBuf::from("xymonnet/CMakeLists.txt"),
        }
    }
}

impl Default for LinuxScripts {
    fn default() -> Self {
        Self {
            debian: PathBuf::from("ci/deps/packages-debian.sh"),
            default: PathBuf::from("ci/deps/packages-gh-debian.sh"),
        }
    }
}

impl LinuxScripts {
    /// Script sourced for a Linux family.
    pub fn for_family(&self, family: &str) -> &PathBuf {
        if family == "debian" {
            &self.debian
        } else {
            &self.default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings: AuditSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, AuditSettings::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let settings: AuditSettings = serde_yaml::from_str(
            r#"
data_dir: packaging
cmake:
  server: server/CMakeLists.txt
"#,
        )
        .unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("packaging"));
        assert_eq!(settings.cmake.server, PathBuf::from("server/CMakeLists.txt"));
        assert_eq!(settings.cmake.client, PathBuf::from("client/CMakeLists.txt"));
        assert_eq!(settings.bsd_packagers, vec!["pkg", "pkgin", "pkg_add"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<AuditSettings, _> = serde_yaml::from_str("data_directory: x");
        assert!(result.is_err());
    }

    #[test]
    fn linux_script_depends_on_family() {
        let scripts = LinuxScripts::default();
        assert_eq!(
            scripts.for_family("debian"),
            &PathBuf::from("ci/deps/packages-debian.sh")
        );
        assert_eq!(
            scripts.for_family("linux_github"),
            &PathBuf::from("ci/deps/packages-gh-debian.sh")
        );
    }
}
