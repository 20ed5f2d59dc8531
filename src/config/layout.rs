//! Resolved project paths.
//!
//! [`ProjectLayout`] pairs the project root with its settings and turns
//! every configured relative path into an absolute one. It is created once
//! per run and passed to every check.

use std::path::{Path, PathBuf};

use super::settings::AuditSettings;
use crate::deps::Variant;

pub const CLIENT_DEPS: &str = "deps-client.yaml";
pub const LOCALCLIENT_DEPS: &str = "deps-localclient.yaml";
pub const SERVER_DEPS: &str = "deps-server.yaml";
pub const MAP_FILE: &str = "deps-map.yaml";
pub const META_FILE: &str = "deps-meta.yaml";

/// Project root plus settings.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    settings: AuditSettings,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, settings: AuditSettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &AuditSettings {
        &self.settings
    }

    /// Join a root-relative path.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn data_file(&self, name: &str) -> PathBuf {
        self.root.join(&self.settings.data_dir).join(name)
    }

    /// `deps-<variant>.yaml`.
    pub fn deps_file(&self, variant: Variant) -> PathBuf {
        self.data_file(&format!("deps-{}.yaml", variant))
    }

    pub fn map_file(&self) -> PathBuf {
        self.data_file(MAP_FILE)
    }

    pub fn meta_file(&self) -> PathBuf {
        self.data_file(META_FILE)
    }

    /// Data documents that must exist for a check run.
    pub fn required_files(&self) -> Vec<PathBuf> {
        [CLIENT_DEPS, LOCALCLIENT_DEPS, SERVER_DEPS]
            .iter()
            .map(|name| self.data_file(name))
            .collect()
    }

    pub fn workflows_dir(&self) -> PathBuf {
        self.path(&self.settings.workflows_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_files_live_under_data_dir() {
        let layout = ProjectLayout::new("/repo", AuditSettings::default());
        assert_eq!(
            layout.deps_file(Variant::Server),
            PathBuf::from("/repo/ci/deps/data/deps-server.yaml")
        );
        assert_eq!(
            layout.map_file(),
            PathBuf::from("/repo/ci/deps/data/deps-map.yaml")
        );
    }

    #[test]
    fn required_files_cover_three_documents() {
        let layout = ProjectLayout::new("/repo", AuditSettings::default());
        let files = layout.required_files();
        assert_eq!(files.len(), 3);
        assert!(files[1].ends_with("deps-localclient.yaml"));
    }

    #[test]
    fn custom_data_dir_is_respected() {
        let settings = AuditSettings {
            data_dir: PathBuf::from("packaging"),
            ..Default::default()
        };
        let layout = ProjectLayout::new("/repo", settings);
        assert_eq!(
            layout.meta_file(),
            PathBuf::from("/repo/packaging/deps-meta.yaml")
        );
    }
}
