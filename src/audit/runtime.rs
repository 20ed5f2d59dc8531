//! Runtime tool references in shell scripts.
//!
//! Every tool declared under `runtime.tools` should be used by at least
//! one script in the tree. A miss is advisory: the tool may be invoked
//! indirectly or only documented.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::tokens::{normalize_token, TokenScanner};
use crate::deps::DependencySpec;

/// Directories never scanned for scripts.
const SKIP_DIRS: &[&str] = &[".git", "target", "node_modules"];

/// Normalised first word of every declared runtime tool.
///
/// `"curl (for http checks)"` contributes `curl`.
pub fn runtime_tool_tokens<'a>(specs: impl IntoIterator<Item = &'a DependencySpec>) -> BTreeSet<String> {
    specs
        .into_iter()
        .flat_map(|spec| spec.runtime.tools.all())
        .filter_map(|tool| tool.split_whitespace().next())
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Every `*.sh` file under `root`, sorted.
pub fn shell_scripts_under(root: &Path) -> Vec<PathBuf> {
    let mut scripts: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && SKIP_DIRS
                    .iter()
                    .any(|skip| entry.file_name() == std::ffi::OsStr::new(skip)))
        })
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "sh"))
        .collect();
    scripts.sort();
    scripts
}

/// Declared tools that no script under `root` mentions, sorted.
pub fn unreferenced_tools(root: &Path, tokens: &BTreeSet<String>) -> Vec<String> {
    let scripts = shell_scripts_under(root);
    tracing::debug!("Scanning {} scripts for {} runtime tools", scripts.len(), tokens.len());
    let found = TokenScanner::new(tokens).scan_files(&scripts);
    tokens.difference(&found).cloned().collect()
}
