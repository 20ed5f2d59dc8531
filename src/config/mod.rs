//! Project settings and input loading.
//!
//! - Settings file schema in [`settings`]
//! - Resolved project paths in [`layout`]
//! - YAML loading and error mapping in [`loader`]
//!
//! # Example
//!
//! ```
//! use depaudit::config::{load_layout, ProjectLayout};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let layout = load_layout(temp.path(), None).unwrap();
//! assert!(layout.map_file().ends_with("ci/deps/data/deps-map.yaml"));
//! ```

pub mod layout;
pub mod loader;
pub mod settings;

pub use layout::ProjectLayout;
pub use loader::{
    load_document, load_layout, load_optional, load_settings, load_yaml, LoadedDocument,
    SETTINGS_FILE,
};
pub use settings::{AuditSettings, CmakeSettings, LinuxScripts};
