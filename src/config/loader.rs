//! Loading of data documents and the settings file.
//!
//! Missing or unparsable input maps to [`DepauditError::InputNotFound`] and
//! [`DepauditError::ParseError`]; both end the run with exit code 2.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::config::layout::ProjectLayout;
use crate::config::settings::AuditSettings;
use crate::deps::{schema, DependencySpec};
use crate::error::{DepauditError, Result};

/// Default settings file name, relative to the project root.
pub const SETTINGS_FILE: &str = ".depaudit.yml";

/// A dependency document as both raw YAML and typed data.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub raw: Value,
    pub spec: DependencySpec,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DepauditError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DepauditError::Io(e)
        }
    })
}

fn parse_error(path: &Path, message: impl Into<String>) -> DepauditError {
    DepauditError::ParseError {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Load a YAML file whose root must be a mapping.
pub fn load_yaml(path: &Path) -> Result<Value> {
    let content = read(path)?;
    let value: Value = serde_yaml::from_str(&content).map_err(|e| parse_error(path, e.to_string()))?;
    if !value.is_mapping() {
        return Err(parse_error(
            path,
            "Unexpected YAML structure (root is not a mapping)",
        ));
    }
    Ok(value)
}

/// Load, structurally validate and deserialize a `deps-*.yaml` document.
pub fn load_document(path: &Path) -> Result<LoadedDocument> {
    let raw = load_yaml(path)?;
    schema::validate_document(path, &raw)?;
    let spec = serde_yaml::from_value(schema::stringify_keys(raw.clone()))
        .map_err(|e| parse_error(path, e.to_string()))?;
    tracing::debug!("Loaded dependency document {}", path.display());
    Ok(LoadedDocument {
        path: path.to_path_buf(),
        raw,
        spec,
    })
}

/// Load an optional side document, defaulting when the file is absent.
pub fn load_optional<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        tracing::debug!("Optional file {} not present", path.display());
        return Ok(T::default());
    }
    let raw = load_yaml(path)?;
    serde_yaml::from_value(schema::stringify_keys(raw)).map_err(|e| parse_error(path, e.to_string()))
}

/// Load settings for a project.
///
/// An explicit path must exist. Without one, `.depaudit.yml` in the root
/// is used when present and defaults apply otherwise.
pub fn load_settings(root: &Path, explicit: Option<&Path>) -> Result<AuditSettings> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = root.join(SETTINGS_FILE);
            if !candidate.exists() {
                return Ok(AuditSettings::default());
            }
            candidate
        }
    };
    let content = read(&path)?;
    if content.trim().is_empty() {
        return Ok(AuditSettings::default());
    }
    serde_yaml::from_str(&content).map_err(|e| parse_error(&path, e.to_string()))
}

/// Resolve the layout for a project root.
pub fn load_layout(root: &Path, explicit: Option<&Path>) -> Result<ProjectLayout> {
    let settings = load_settings(root, explicit)?;
    Ok(ProjectLayout::new(root, settings))
}
