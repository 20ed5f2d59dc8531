//! Dependency data: model, validation, resolution and reconciliation.
//!
//! # Overview
//!
//! - [`model`] - Typed `deps-*.yaml`, `deps-map.yaml` and `deps-meta.yaml`
//! - [`schema`] - Fail-fast structural validation with dotted key paths
//! - [`resolve`] - Alias and per-platform package-name resolution
//! - [`expected`] - Candidate sets from the installer shell libraries
//! - [`reconcile`] - Declared-versus-candidate matching and diffs
//! - [`installer`] - Facts scraped from installer script text
//! - [`packages`] - Data-driven package selection (`depaudit packages`)
//! - [`tables`] - Generated bash lookup tables (`depaudit generate`)
//!
//! # Example
//!
//! ```
//! use depaudit::deps::{resolve, DependencyMap, MatchResult, Reconciliation};
//!
//! let map: DependencyMap = serde_yaml::from_str(
//!     "map: {FOO: {x: {y: {z: [foo-dev]}}}}",
//! ).unwrap();
//! let declared = resolve(&["FOO".to_string()], &map, "x", "y", "z");
//! assert_eq!(declared, vec!["foo-dev"]);
//!
//! let r = Reconciliation::compute("build x y z client", &declared, &[vec!["foo-dev".into()]]);
//! assert_eq!(r.result, MatchResult::Matched(0));
//! ```

pub mod expected;
pub mod installer;
pub mod model;
pub mod packages;
pub mod reconcile;
pub mod resolve;
pub mod schema;
pub mod tables;

pub use expected::{
    Candidate, ExpectedSetGenerator, Flag, FlagSet, PackageQuery, PackageSource, Platform,
    ShellPackageSource,
};
pub use model::{
    BuildCombo, DependencyMap, DependencyMeta, DependencySpec, PackagerEntry, Requirement,
    RuntimeRequirements, ScriptMeta, Variant,
};
pub use packages::{normalize_switch, select_packages, PackageRequest};
pub use reconcile::{diff, include_if_declared, reconcile, MatchResult, Reconciliation, SetDiff};
pub use resolve::{mapped_packages, resolve, resolve_alias, resolve_for};
pub use tables::render_tables;
