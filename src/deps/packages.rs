//! Package list selection straight from the YAML data.
//!
//! This is the data-driven counterpart of the installer shell functions,
//! exposed as `depaudit packages`. The check pipeline runs the project's
//! wrapper script around it for every build combination.

use super::model::{DependencyMap, DependencySpec, Variant};
use super::resolve::resolve;
use crate::error::{DepauditError, Result};

/// Token dropped when the ldap switch is off.
pub const LDAP_TOKEN: &str = "LDAP";
/// Token dropped when the snmp switch is off.
pub const SNMP_TOKEN: &str = "NETSNMP";

/// Normalise an ON/OFF style switch.
///
/// Truthy spellings become `ON`, falsy ones `OFF`; anything else is
/// upper-cased and kept. A missing value takes `default`.
pub fn normalize_switch(value: Option<&str>, default: &str) -> String {
    let Some(value) = value else {
        return default.to_string();
    };
    let value = value.trim().to_uppercase();
    match value.as_str() {
        "ON" | "YES" | "Y" | "TRUE" | "1" => "ON".to_string(),
        "OFF" | "NO" | "N" | "FALSE" | "0" => "OFF".to_string(),
        _ => value,
    }
}

/// Parameters of one package-list request.
#[derive(Debug, Clone)]
pub struct PackageRequest {
    pub variant: Variant,
    pub family: String,
    pub os: String,
    pub pkgmgr: String,
    /// Normalised ldap switch.
    pub enable_ldap: String,
    /// Normalised snmp switch.
    pub enable_snmp: String,
}

/// Resolved package names for a request, in declaration order.
///
/// On the server variant, `LDAP` and `NETSNMP` are dropped when their
/// switches are off. On the `bsd` family `LDAP` is always dropped, since
/// its package is matched separately there.
pub fn select_packages(
    spec: &DependencySpec,
    dep_map: &DependencyMap,
    request: &PackageRequest,
) -> Result<Vec<String>> {
    let entry = spec
        .packager(&request.family, &request.os, &request.pkgmgr)
        .ok_or_else(|| DepauditError::Structural {
            message: format!(
                "Failed to locate package list: build.{}.{}.packagers.{}.libs.mandatory",
                request.family, request.os, request.pkgmgr
            ),
        })?;

    let drop_ldap = (request.variant == Variant::Server && request.enable_ldap == "OFF")
        || request.family == "bsd";
    let drop_snmp = request.variant == Variant::Server && request.enable_snmp == "OFF";

    let items: Vec<String> = entry
        .libs
        .mandatory
        .iter()
        .filter(|item| !(drop_ldap && *item == LDAP_TOKEN))
        .filter(|item| !(drop_snmp && *item == SNMP_TOKEN))
        .cloned()
        .collect();

    Ok(resolve(
        &items,
        dep_map,
        &request.family,
        &request.os,
        &request.pkgmgr,
    ))
}
