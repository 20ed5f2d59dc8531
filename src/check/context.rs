//! Everything a check needs, loaded once per run.

use std::collections::{BTreeMap, BTreeSet};

use crate::audit::read_lossy;
use crate::config::layout::LOCALCLIENT_DEPS;
use crate::config::{load_document, load_optional, LoadedDocument, ProjectLayout};
use crate::deps::installer::{bsd_package_managers, mentions_package};
use crate::deps::{DependencyMap, DependencyMeta, PackageSource, Variant};
use crate::error::Result;

/// Family handled by the BSD installer library.
pub const BSD_FAMILY: &str = "bsd";

/// Switches from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub skip_shellcheck: bool,
    /// Skip the per-platform resolver tool pass.
    pub skip_tool: bool,
}

/// The three dependency documents plus the side tables.
#[derive(Debug, Clone)]
pub struct ProjectData {
    pub client: LoadedDocument,
    pub localclient: LoadedDocument,
    pub server: LoadedDocument,
    pub map: DependencyMap,
    pub meta: DependencyMeta,
}

impl ProjectData {
    /// Load and structurally validate every data file, stopping at the
    /// first problem.
    pub fn load(layout: &ProjectLayout) -> Result<Self> {
        let client = load_document(&layout.deps_file(Variant::Client))?;
        let localclient = load_document(&layout.data_file(LOCALCLIENT_DEPS))?;
        let server = load_document(&layout.deps_file(Variant::Server))?;
        let map = load_optional(&layout.map_file())?;
        let meta = load_optional(&layout.meta_file())?;
        Ok(Self {
            client,
            localclient,
            server,
            map,
            meta,
        })
    }

    /// Documents that are audited beyond structure, with their names.
    pub fn audited(&self) -> [(&'static str, &LoadedDocument); 2] {
        [("client", &self.client), ("server", &self.server)]
    }

    /// `build` keys of the client document.
    pub fn families(&self) -> BTreeSet<String> {
        self.client.spec.build.keys().cloned().collect()
    }

    /// Client families served by the Linux installer libraries.
    pub fn linux_families(&self) -> BTreeSet<String> {
        self.client
            .spec
            .build
            .keys()
            .filter(|family| family.as_str() != BSD_FAMILY)
            .cloned()
            .collect()
    }
}

/// Facts read from the BSD installer script.
#[derive(Debug, Clone, Default)]
pub struct InstallerFacts {
    /// OS name → package manager from the `case "${OS_NAME}"` block.
    pub bsd_package_managers: BTreeMap<String, String>,
    /// Whether the installer mentions the directory-service package.
    pub mentions_directory_service: bool,
}

impl InstallerFacts {
    /// Read the configured BSD installer. A missing installer yields no
    /// facts.
    pub fn load(layout: &ProjectLayout) -> Result<Self> {
        let path = layout.path(&layout.settings().bsd_installer);
        if !path.exists() {
            tracing::debug!("BSD installer {} not present", path.display());
            return Ok(Self::default());
        }
        let script = read_lossy(&path)?;
        Ok(Self {
            bsd_package_managers: bsd_package_managers(&script),
            mentions_directory_service: mentions_package(
                &script,
                &layout.settings().directory_service_package,
            ),
        })
    }

    /// Lower-cased OS names with a known BSD package manager.
    pub fn bsd_os_names(&self) -> BTreeSet<String> {
        self.bsd_package_managers
            .keys()
            .map(|name| name.to_lowercase())
            .collect()
    }
}

/// Shared, read-only state for one check run.
pub struct CheckContext<'a> {
    pub layout: &'a ProjectLayout,
    pub data: &'a ProjectData,
    pub source: &'a dyn PackageSource,
    pub installer: InstallerFacts,
    pub options: CheckOptions,
}

impl<'a> CheckContext<'a> {
    pub fn new(
        layout: &'a ProjectLayout,
        data: &'a ProjectData,
        source: &'a dyn PackageSource,
        options: CheckOptions,
    ) -> Result<Self> {
        Ok(Self {
            layout,
            data,
            source,
            installer: InstallerFacts::load(layout)?,
            options,
        })
    }
}
