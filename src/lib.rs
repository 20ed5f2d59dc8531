//! depaudit - Consistency checks for packaging dependency data.
//!
//! A project declares its build and runtime dependencies per platform in
//! `deps-*.yaml` documents. depaudit verifies those documents against the
//! installer scripts that consume them, the CMake files that link against
//! the libraries, and the CI workflows that call the installers.
//!
//! # Modules
//!
//! - [`audit`] - Cross-references with scripts, CMake files and workflows
//! - [`check`] - The check pipeline, reports and formatters
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings, project layout and input loading
//! - [`deps`] - Dependency data model, resolution and reconciliation
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Subprocess execution
//! - [`ui`] - Terminal styling
//!
//! # Example
//!
//! ```
//! use depaudit::deps::{normalize_switch, select_packages, DependencyMap, DependencySpec};
//! use depaudit::deps::{PackageRequest, Variant};
//!
//! let spec: DependencySpec = serde_yaml::from_str(r#"
//! build:
//!   debian:
//!     debian_12:
//!       packagers:
//!         apt:
//!           libs: {mandatory: [PCRE2, NETSNMP]}
//! runtime: {libs: {}, tools: {}}
//! "#).unwrap();
//!
//! let request = PackageRequest {
//!     variant: Variant::Server,
//!     family: "debian".into(),
//!     os: "debian_12".into(),
//!     pkgmgr: "apt".into(),
//!     enable_ldap: normalize_switch(None, "OFF"),
//!     enable_snmp: normalize_switch(Some("no"), "OFF"),
//! };
//! let packages = select_packages(&spec, &DependencyMap::default(), &request).unwrap();
//! assert_eq!(packages, vec!["PCRE2"]);
//! ```

pub mod audit;
pub mod check;
pub mod cli;
pub mod config;
pub mod deps;
pub mod error;
pub mod shell;
pub mod ui;

pub use error::{DepauditError, Result};
