//! Shared fixtures for check tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::output::{HumanFormatter, ReportFormatter};
use super::{Check, CheckContext, CheckOptions, ProjectData, Report};
use crate::config::{AuditSettings, ProjectLayout};
use crate::deps::{FlagSet, PackageQuery, PackageSource};
use crate::error::Result;

pub(crate) const CLIENT: &str = r#"build:
  debian:
    ubuntu_24.04:
      packagers:
        apt:
          libs:
            mandatory: [FOO]
          tools:
            mandatory: [make]
  bsd:
    freebsd:
      packagers:
        pkg:
          libs:
            mandatory: [FOO]
          tools: {}
runtime:
  libs: {}
  tools:
    mandatory: [fping]
"#;

/// A project tree in a temporary directory with all three documents.
pub(crate) struct Project {
    temp: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let project = Self {
            temp: TempDir::new().unwrap(),
        };
        for name in ["deps-client.yaml", "deps-localclient.yaml", "deps-server.yaml"] {
            project.write(&format!("ci/deps/data/{name}"), CLIENT);
        }
        project
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(self.root(), AuditSettings::default())
    }
}

/// A [`PackageSource`] driven by a closure.
pub(crate) struct FakeSource<F>(F);

impl<F> FakeSource<F>
where
    F: Fn(&PackageQuery, &FlagSet) -> Result<Vec<String>>,
{
    pub fn new(answer: F) -> Self {
        Self(answer)
    }
}

impl<F> PackageSource for FakeSource<F>
where
    F: Fn(&PackageQuery, &FlagSet) -> Result<Vec<String>>,
{
    fn packages(&self, query: &PackageQuery, flags: &FlagSet) -> Result<Vec<String>> {
        (self.0)(query, flags)
    }
}

/// Answers every query with an empty list.
pub(crate) struct NoSource;

impl PackageSource for NoSource {
    fn packages(&self, _query: &PackageQuery, _flags: &FlagSet) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

pub(crate) fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn run_with(
    check: &dyn Check,
    project: &Project,
    source: &dyn PackageSource,
    options: CheckOptions,
) -> Report {
    let layout = project.layout();
    let data = ProjectData::load(&layout).unwrap();
    let ctx = CheckContext::new(&layout, &data, source, options).unwrap();
    check.run(&ctx).unwrap()
}

pub(crate) fn run(check: &dyn Check, project: &Project, source: &dyn PackageSource) -> Report {
    run_with(check, project, source, CheckOptions::default())
}

/// Plain human rendering.
pub(crate) fn render(report: &Report) -> String {
    let mut out = Vec::new();
    HumanFormatter::new(false).format(report, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}
