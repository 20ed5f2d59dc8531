//! Structural validation of dependency documents.
//!
//! Runs on the raw YAML tree before it is deserialized, so that a missing
//! key is reported by its dotted path rather than as a serde error. Every
//! check fails fast: the first problem found is returned and nothing after
//! it is inspected.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{DepauditError, Result};

fn require(cond: bool, message: impl FnOnce() -> String) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(DepauditError::Structural { message: message() })
    }
}

/// Render a mapping key for a dotted path.
pub(crate) fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "~".to_string(),
        other => format!("{:?}", other),
    }
}

/// Rewrite number and bool mapping keys as strings, recursively.
///
/// YAML reads `12:` as an integer key; the typed model keys every map by
/// name.
pub fn stringify_keys(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(key, value)| {
                    let key = match key {
                        Value::Number(_) | Value::Bool(_) => Value::String(key_name(&key)),
                        other => other,
                    };
                    (key, stringify_keys(value))
                })
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(stringify_keys).collect()),
        other => other,
    }
}

fn has(map: &Mapping, key: &str) -> bool {
    map.contains_key(key)
}

/// Validate the shape of a `deps-*.yaml` document.
///
/// Requires `build` and `runtime`; every `build.<family>.<os>` to be a
/// mapping with `packagers`; every packager to carry `libs.mandatory`;
/// `runtime.libs` and `runtime.tools`; and `version_notes`, when present,
/// to be a mapping.
pub fn validate_document(path: &Path, doc: &Value) -> Result<()> {
    let p = path.display();
    let root = doc.as_mapping();
    require(root.is_some_and(|m| has(m, "build")), || {
        format!("{p} missing build section")
    })?;
    require(root.is_some_and(|m| has(m, "runtime")), || {
        format!("{p} missing runtime section")
    })?;

    let build = doc.get("build").and_then(Value::as_mapping);
    require(build.is_some(), || format!("{p} build must be a mapping"))?;

    for (family_key, family_entry) in build.into_iter().flatten() {
        let family = key_name(family_key);
        let oses = family_entry.as_mapping();
        require(oses.is_some(), || {
            format!("{p} build.{family} must be a mapping")
        })?;

        for (os_key, os_entry) in oses.into_iter().flatten() {
            let os = key_name(os_key);
            let os_map = os_entry.as_mapping();
            require(os_map.is_some(), || {
                format!("{p} build.{family}.{os} must be a mapping")
            })?;
            require(os_map.is_some_and(|m| has(m, "packagers")), || {
                format!("{p} missing build.{family}.{os}.packagers")
            })?;

            let packagers = os_entry.get("packagers").and_then(Value::as_mapping);
            for (pkg_key, pkg) in packagers.into_iter().flatten() {
                let pkgmgr = key_name(pkg_key);
                let location = format!("build.{family}.{os}.packagers.{pkgmgr}");
                require(pkg.get("libs").is_some(), || {
                    format!("{p} missing libs for {location}")
                })?;
                let libs = pkg.get("libs").and_then(Value::as_mapping);
                require(libs.is_some_and(|m| has(m, "mandatory")), || {
                    format!("{p} missing libs.mandatory for {location}")
                })?;
            }
        }
    }

    let runtime = doc.get("runtime").and_then(Value::as_mapping);
    require(runtime.is_some_and(|m| has(m, "libs")), || {
        format!("{p} missing runtime.libs")
    })?;
    require(runtime.is_some_and(|m| has(m, "tools")), || {
        format!("{p} missing runtime.tools")
    })?;

    if let Some(notes) = doc.get("version_notes") {
        require(notes.is_mapping(), || {
            format!("{p} version_notes must be a mapping")
        })?;
    }

    Ok(())
}

/// Stricter pass over an already valid document.
///
/// Each packager must declare both `libs` and `tools`, and `runtime` must
/// declare both `libs` and `tools`. `name` labels the document in messages
/// (`client`, `server`).
pub fn check_completeness(name: &str, doc: &Value) -> Result<()> {
    let build = doc.get("build").and_then(Value::as_mapping);
    for (family_key, family_entry) in build.into_iter().flatten() {
        let family = key_name(family_key);
        let oses = family_entry.as_mapping();
        for (os_key, os_entry) in oses.into_iter().flatten() {
            let os = key_name(os_key);
            let packagers = os_entry.get("packagers").and_then(Value::as_mapping);
            for (pkg_key, pkg) in packagers.into_iter().flatten() {
                let pkgmgr = key_name(pkg_key);
                require(pkg.get("libs").is_some() && pkg.get("tools").is_some(), || {
                    format!("{name} missing libs/tools for {family}.{os}.{pkgmgr}")
                })?;
                let has_mandatory = pkg
                    .get("libs")
                    .and_then(Value::as_mapping)
                    .is_some_and(|m| has(m, "mandatory"));
                require(has_mandatory, || {
                    format!("{name} missing libs.mandatory for {family}.{os}.{pkgmgr}")
                })?;
            }
        }
    }

    let runtime = doc.get("runtime");
    require(
        runtime.is_some_and(|r| r.get("libs").is_some() && r.get("tools").is_some()),
        || format!("{name} missing runtime.libs/tools"),
    )
}
