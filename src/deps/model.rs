//! Typed view of the dependency data documents.
//!
//! Documents are first checked structurally as raw YAML (see
//! [`schema`](super::schema)) and then deserialized into these types.
//! Everything here is read-only after load.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Packages a single token maps to, keyed by family, os and package manager.
pub type PackageTable = BTreeMap<String, BTreeMap<String, BTreeMap<String, Option<Vec<String>>>>>;

/// Reads an explicit YAML `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root of a `deps-*.yaml` document.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct DependencySpec {
    /// family → os → build entry.
    pub build: BTreeMap<String, BTreeMap<String, OsEntry>>,

    /// Libraries and tools needed at runtime.
    pub runtime: RuntimeRequirements,

    /// Free-form notes about version constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_notes: Option<BTreeMap<String, serde_json::Value>>,
}

/// Build entry for one operating system.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct OsEntry {
    /// package manager → requirement lists.
    #[serde(default, deserialize_with = "null_as_default")]
    pub packagers: BTreeMap<String, PackagerEntry>,
}

/// Requirements for one package manager.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct PackagerEntry {
    /// Libraries to install before building.
    #[serde(default, deserialize_with = "null_as_default")]
    pub libs: Requirement,

    /// Tools to install before building.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tools: Requirement,
}

/// A mandatory/optional token split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Requirement {
    /// Required tokens. Order is kept but not significant.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mandatory: Vec<String>,

    /// Tokens that enable extra features.
    #[serde(default, deserialize_with = "null_as_default")]
    pub optional: Vec<String>,
}

impl Requirement {
    /// Mandatory then optional tokens.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.mandatory.iter().chain(self.optional.iter())
    }
}

/// The `runtime` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct RuntimeRequirements {
    #[serde(default, deserialize_with = "null_as_default")]
    pub libs: Requirement,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tools: Requirement,
}

/// One `(family, os, pkgmgr)` entry of the build matrix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildCombo {
    pub family: String,
    pub os: String,
    pub pkgmgr: String,
}

impl BuildCombo {
    pub fn new(family: impl Into<String>, os: impl Into<String>, pkgmgr: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            os: os.into(),
            pkgmgr: pkgmgr.into(),
        }
    }
}

impl fmt::Display for BuildCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.family, self.os, self.pkgmgr)
    }
}

impl DependencySpec {
    /// Every `(family, os, pkgmgr)` declared under `build`, in key order.
    pub fn combinations(&self) -> Vec<BuildCombo> {
        let mut combos = Vec::new();
        for (family, oses) in &self.build {
            for (os, entry) in oses {
                for pkgmgr in entry.packagers.keys() {
                    combos.push(BuildCombo::new(family, os, pkgmgr));
                }
            }
        }
        combos
    }

    /// Look up a packager entry.
    pub fn packager(&self, family: &str, os: &str, pkgmgr: &str) -> Option<&PackagerEntry> {
        self.build.get(family)?.get(os)?.packagers.get(pkgmgr)
    }

    /// `libs.mandatory` for a combination, empty when it is not declared.
    pub fn mandatory_libs(&self, combo: &BuildCombo) -> &[String] {
        self.packager(&combo.family, &combo.os, &combo.pkgmgr)
            .map(|p| p.libs.mandatory.as_slice())
            .unwrap_or(&[])
    }
}

/// Which build profile a dependency document describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Variant {
    Client,
    Server,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Client => "client",
            Variant::Server => "server",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `deps-map.yaml` side table.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct DependencyMap {
    /// token → canonical token.
    #[serde(default, deserialize_with = "null_as_default")]
    pub aliases: BTreeMap<String, String>,

    /// token → family → os → pkgmgr → packages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub map: BTreeMap<String, PackageTable>,
}

/// The `deps-meta.yaml` installer contract table.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct DependencyMeta {
    /// Script path (relative to the root) → contract.
    #[serde(default, deserialize_with = "null_as_default")]
    pub scripts: BTreeMap<String, ScriptMeta>,
}

/// Argument contract of one installer script.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ScriptMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub requires_flags: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub requires_env: Vec<String>,

    /// Argument name → accepted values.
    #[serde(default, deserialize_with = "null_as_default")]
    pub accepts: BTreeMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT: &str = r#"
build:
  debian:
    ubuntu_24.04:
      packagers:
        apt:
          libs:
            mandatory: [PCRE2, OPENSSL]
          tools:
            mandatory: [cmake]
  bsd:
    freebsd:
      packagers:
        pkg:
          libs:
            mandatory:
runtime:
  libs:
    mandatory: [PCRE2]
  tools:
    mandatory: [fping]
    optional: ["curl (for http checks)"]
"#;

    #[test]
    fn parses_build_matrix() {
        let spec: DependencySpec = serde_yaml::from_str(CLIENT).unwrap();
        let combo = BuildCombo::new("debian", "ubuntu_24.04", "apt");
        assert_eq!(spec.mandatory_libs(&combo), ["PCRE2", "OPENSSL"]);
        assert_eq!(
            spec.packager("debian", "ubuntu_24.04", "apt").unwrap().tools.mandatory,
            vec!["cmake"]
        );
    }

    #[test]
    fn null_mandatory_reads_as_empty() {
        let spec: DependencySpec = serde_yaml::from_str(CLIENT).unwrap();
        let combo = BuildCombo::new("bsd", "freebsd", "pkg");
        assert!(spec.mandatory_libs(&combo).is_empty());
    }

    #[test]
    fn combinations_are_in_key_order() {
        let spec: DependencySpec = serde_yaml::from_str(CLIENT).unwrap();
        let combos = spec.combinations();
        assert_eq!(
            combos,
            vec![
                BuildCombo::new("bsd", "freebsd", "pkg"),
                BuildCombo::new("debian", "ubuntu_24.04", "apt"),
            ]
        );
    }

    #[test]
    fn unknown_combination_has_no_libs() {
        let spec: DependencySpec = serde_yaml::from_str(CLIENT).unwrap();
        assert!(spec
            .mandatory_libs(&BuildCombo::new("rhel", "rocky_9", "dnf"))
            .is_empty());
    }

    #[test]
    fn runtime_tools_chain_mandatory_and_optional() {
        let spec: DependencySpec = serde_yaml::from_str(CLIENT).unwrap();
        let tools: Vec<_> = spec.runtime.tools.all().cloned().collect();
        assert_eq!(tools, vec!["fping", "curl (for http checks)"]);
    }

    #[test]
    fn map_tolerates_null_package_lists() {
        let map: DependencyMap = serde_yaml::from_str(
            r#"
aliases:
  OpenSSL: OPENSSL
map:
  OPENSSL:
    debian:
      ubuntu_24.04:
        apt: [libssl-dev]
        aptitude:
"#,
        )
        .unwrap();
        assert_eq!(map.aliases["OpenSSL"], "OPENSSL");
        let os = &map.map["OPENSSL"]["debian"]["ubuntu_24.04"];
        assert_eq!(os["apt"].as_deref(), Some(&["libssl-dev".to_string()][..]));
        assert!(os["aptitude"].is_none());
    }

    #[test]
    fn meta_defaults_missing_lists() {
        let meta: DependencyMeta = serde_yaml::from_str(
            r#"
scripts:
  ci/deps/install-gh-debian-packages.sh:
    requires_flags: [--distro-family]
"#,
        )
        .unwrap();
        let script = &meta.scripts["ci/deps/install-gh-debian-packages.sh"];
        assert_eq!(script.requires_flags, vec!["--distro-family"]);
        assert!(script.requires_env.is_empty());
        assert!(script.accepts.is_empty());
    }

    #[test]
    fn variant_displays_lowercase() {
        assert_eq!(Variant::Client.to_string(), "client");
        assert_eq!(Variant::Server.as_str(), "server");
    }
}
