//! Alias and package-name resolution.
//!
//! Declared data uses generic tokens (`OPENSSL`, `PCRE2`). The side table in
//! `deps-map.yaml` translates them into the concrete package names used by
//! a given package manager. A token without a mapping is kept as-is; there
//! is no failure mode.

use super::model::{BuildCombo, DependencyMap};

/// Resolve tokens to package names for one `(family, os, pkgmgr)`.
///
/// A token with a non-empty `map[token][family][os][pkgmgr]` list is
/// replaced by that list; all other tokens pass through unchanged. Output
/// order follows input order.
pub fn resolve(
    tokens: &[String],
    dep_map: &DependencyMap,
    family: &str,
    os: &str,
    pkgmgr: &str,
) -> Vec<String> {
    let mut resolved = Vec::with_capacity(tokens.len());
    for token in tokens {
        let packages = dep_map
            .map
            .get(token)
            .and_then(|families| families.get(family))
            .and_then(|oses| oses.get(os))
            .and_then(|pkgmgrs| pkgmgrs.get(pkgmgr))
            .and_then(Option::as_ref)
            .filter(|list| !list.is_empty());

        match packages {
            Some(list) => resolved.extend(list.iter().cloned()),
            None => resolved.push(token.clone()),
        }
    }
    resolved
}

/// [`resolve`] for a [`BuildCombo`].
pub fn resolve_for(tokens: &[String], dep_map: &DependencyMap, combo: &BuildCombo) -> Vec<String> {
    resolve(tokens, dep_map, &combo.family, &combo.os, &combo.pkgmgr)
}

/// Canonical name of a token, or the token itself.
pub fn resolve_alias<'a>(token: &'a str, dep_map: &'a DependencyMap) -> &'a str {
    dep_map
        .aliases
        .get(token)
        .map(String::as_str)
        .unwrap_or(token)
}

/// Every package a token maps to on any platform.
///
/// Returns `None` when the token has no `map` entry at all, which callers
/// treat differently from an entry with no packages.
pub fn mapped_packages(token: &str, dep_map: &DependencyMap) -> Option<Vec<String>> {
    let families = dep_map.map.get(token)?;
    let packages = families
        .values()
        .flat_map(|oses| oses.values())
        .flat_map(|pkgmgrs| pkgmgrs.values())
        .flatten()
        .flat_map(|list| list.iter().cloned())
        .collect();
    Some(packages)
}
