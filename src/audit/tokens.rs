//! Token normalisation and text scanning.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use regex::Regex;

/// Lower-case a token and drop everything but ASCII letters and digits.
///
/// `Net-SNMP` and `netsnmp` both normalise to `netsnmp`.
pub fn normalize_token(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Finds whole-word occurrences of a fixed set of tokens.
#[derive(Debug, Clone)]
pub struct TokenScanner {
    patterns: Vec<(String, Regex)>,
}

impl TokenScanner {
    /// Build a scanner; empty tokens are ignored. Matching is
    /// case-insensitive and anchored on word boundaries.
    pub fn new<'a>(tokens: impl IntoIterator<Item = &'a String>) -> Self {
        let patterns = tokens
            .into_iter()
            .filter(|t| !t.is_empty())
            .filter_map(|t| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(t)))
                    .ok()
                    .map(|re| (t.clone(), re))
            })
            .collect();
        Self { patterns }
    }

    /// Tokens that occur in `text`.
    pub fn scan(&self, text: &str) -> BTreeSet<String> {
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(token, _)| token.clone())
            .collect()
    }

    /// Tokens that occur in any of `files`. Unreadable files are skipped
    /// and invalid UTF-8 is replaced.
    pub fn scan_files<P: AsRef<Path>>(&self, files: &[P]) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        for file in files {
            let Ok(text) = read_lossy(file.as_ref()) else {
                tracing::debug!("Skipping unreadable {}", file.as_ref().display());
                continue;
            };
            found.extend(self.scan(&text));
            if found.len() == self.patterns.len() {
                break;
            }
        }
        found
    }
}

/// Read a text file, replacing invalid UTF-8.
pub fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
