//! CMake linkage cross-check.
//!
//! Library names found in `find_package`, `find_library` and `find_path`
//! directives are compared with the packages declared for one Linux build
//! combination. The comparison is heuristic and only ever produces notes.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::tokens::normalize_token;
use crate::deps::{mapped_packages, resolve_alias, DependencyMap};

static DIRECTIVES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)find_package\(([^)]+)\)").unwrap(),
        Regex::new(r"(?i)find_library\(([^)\s]+)").unwrap(),
        Regex::new(r"(?i)find_path\(([^)\s]+)").unwrap(),
    ]
});

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Dependency names referenced by CMake directives in `text`.
///
/// The first argument of each directive is taken and stripped of anything
/// that is not a word character: `find_package(PCRE2 REQUIRED)` yields
/// `PCRE2`, `find_library(LIBRT_LIB rt)` yields `LIBRT_LIB`.
pub fn extract_cmake_deps(text: &str) -> BTreeSet<String> {
    let mut deps = BTreeSet::new();
    for directive in DIRECTIVES.iter() {
        for caps in directive.captures_iter(text) {
            let Some(first) = caps[1].split_whitespace().next() else {
                continue;
            };
            let name = NON_WORD.replace_all(first, "");
            if !name.is_empty() {
                deps.insert(name.into_owned());
            }
        }
    }
    deps
}

/// CMake dependencies that cannot be traced to any declared package.
///
/// A dependency whose canonical name has a `map` entry is satisfied when
/// one of its mapped packages appears in `packages`; an entry that maps to
/// nothing is never reported. Other dependencies are satisfied when their
/// normalised name is a substring of some normalised package name.
pub fn unresolved_deps(
    deps: &BTreeSet<String>,
    packages: &[String],
    dep_map: &DependencyMap,
) -> Vec<String> {
    let normalized: BTreeSet<String> = packages.iter().map(|p| normalize_token(p)).collect();

    deps.iter()
        .filter(|dep| {
            let key = resolve_alias(dep, dep_map);
            match mapped_packages(key, dep_map) {
                Some(mapped) => {
                    !mapped.is_empty()
                        && !mapped
                            .iter()
                            .any(|pkg| normalized.contains(&normalize_token(pkg)))
                }
                None => {
                    let token = normalize_token(dep);
                    !token.is_empty() && !normalized.iter().any(|pkg| pkg.contains(&token))
                }
            }
        })
        .cloned()
        .collect()
}
