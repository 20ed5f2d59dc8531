//! Facts read directly from installer script text.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static CASE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^case\s+"\$\{?OS_NAME\}?"\s+in"#).unwrap());

static PKG_MGR_ARM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^([^)]+)\)\s*PKG_MGR="([^"]+)"\s*;;$"#).unwrap());

/// OS name → package manager, from the `case "${OS_NAME}" in` block of the
/// BSD installer.
///
/// Only single-line arms of the form `freebsd) PKG_MGR="pkg" ;;` are
/// recognised. Alternatives (`FreeBSD|freebsd)`) yield one entry each.
pub fn bsd_package_managers(script: &str) -> BTreeMap<String, String> {
    let mut mapping = BTreeMap::new();
    let mut in_case = false;
    for line in script.lines() {
        let stripped = line.trim();
        if !in_case {
            in_case = CASE_START.is_match(stripped);
            continue;
        }
        if stripped.starts_with("esac") {
            break;
        }
        if let Some(caps) = PKG_MGR_ARM.captures(stripped) {
            for os in caps[1].split('|') {
                let os = os.trim();
                if !os.is_empty() {
                    mapping.insert(os.to_string(), caps[2].to_string());
                }
            }
        }
    }
    mapping
}

/// Expected package manager for an OS, compared case-insensitively.
pub fn package_manager_for<'a>(table: &'a BTreeMap<String, String>, os: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(os))
        .map(|(_, pkgmgr)| pkgmgr.as_str())
}

/// Whether the installer text mentions `package` at all.
pub fn mentions_package(script: &str, package: &str) -> bool {
    !package.is_empty() && script.contains(package)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTALLER: &str = r#"#!/usr/bin/env bash
OS_NAME="$(uname -s | tr '[:upper:]' '[:lower:]')"
case "${OS_NAME}" in
  freebsd) PKG_MGR="pkg" ;;
  OpenBSD|openbsd) PKG_MGR="pkg_add" ;;
  netbsd)
    PKG_MGR="pkgin"
    ;;
esac
pkg install -y openldap-client
"#;

    #[test]
    fn reads_single_line_arms() {
        let table = bsd_package_managers(INSTALLER);
        assert_eq!(table.get("freebsd").map(String::as_str), Some("pkg"));
        assert_eq!(table.get("OpenBSD").map(String::as_str), Some("pkg_add"));
        assert_eq!(table.get("openbsd").map(String::as_str), Some("pkg_add"));
        assert!(!table.contains_key("netbsd"));
    }

    #[test]
    fn ignores_arms_outside_case_block() {
        let text = "  freebsd) PKG_MGR=\"pkg\" ;;\ncase \"${OS_NAME}\" in\nesac\n";
        assert!(bsd_package_managers(text).is_empty());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = bsd_package_managers(INSTALLER);
        assert_eq!(package_manager_for(&table, "FreeBSD"), Some("pkg"));
        assert_eq!(package_manager_for(&table, "dragonfly"), None);
    }

    #[test]
    fn detects_package_mention() {
        assert!(mentions_package(INSTALLER, "openldap-client"));
        assert!(!mentions_package(INSTALLER, "openldap26-client"));
        assert!(!mentions_package(INSTALLER, ""));
    }
}
