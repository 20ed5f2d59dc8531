//! Bash lookup tables generated from the dependency data.
//!
//! The generated file lets installer scripts resolve packages without a
//! YAML parser: three associative arrays keyed by colon-joined paths.

use std::collections::BTreeMap;

use super::model::{DependencyMap, DependencySpec, Variant};

/// Header line identifying generated output.
pub const GENERATED_HEADER: &str =
    "# Generated file: do not edit directly. Run `depaudit generate` to refresh.";

fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn raw_packages(variant: Variant, spec: &DependencySpec, out: &mut BTreeMap<String, String>) {
    for combo in spec.combinations() {
        let key = format!("{}:{}:{}:{}", variant, combo.family, combo.os, combo.pkgmgr);
        out.insert(key, spec.mandatory_libs(&combo).join(" "));
    }
}

fn flat_map(dep_map: &DependencyMap) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (dep, families) in &dep_map.map {
        for (family, oses) in families {
            for (os, pkgmgrs) in oses {
                for (pkgmgr, packages) in pkgmgrs {
                    let key = format!("{dep}:{family}:{os}:{pkgmgr}");
                    let line = packages.as_deref().unwrap_or_default().join(" ");
                    out.insert(key, line);
                }
            }
        }
    }
    out
}

fn write_array(out: &mut String, name: &str, entries: &BTreeMap<String, String>) {
    out.push_str(&format!("declare -A {name}\n"));
    for (key, value) in entries {
        out.push_str(&format!("{name}[{}]={}\n", quote(key), quote(value)));
    }
}

/// Render the complete generated script.
pub fn render_tables(
    client: &DependencySpec,
    server: &DependencySpec,
    dep_map: &DependencyMap,
) -> String {
    let mut raw = BTreeMap::new();
    raw_packages(Variant::Client, client, &mut raw);
    raw_packages(Variant::Server, server, &mut raw);

    let mut out = String::from("#!/usr/bin/env bash\n");
    out.push_str(GENERATED_HEADER);
    out.push_str("\n\n");
    write_array(&mut out, "ci_deps_raw_packages", &raw);
    out.push('\n');
    write_array(&mut out, "ci_deps_map", &flat_map(dep_map));
    out.push('\n');
    write_array(&mut out, "ci_deps_aliases", &dep_map.aliases);
    out
}
