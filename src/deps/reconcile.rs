//! Declared-versus-expected package set reconciliation.
//!
//! The flag values used to produce the declared data are not recorded, so
//! there is no single canonical expected set. The declared set is compared
//! against every candidate the installer could produce; the first exact
//! match wins. With no match, the first candidate is used to compute a
//! readable diff.

use std::collections::BTreeSet;

/// Outcome of matching a declared set against candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The declared set equals the candidate at this index.
    Matched(usize),
    /// No candidate matched; the diff is computed against this index.
    Unmatched(usize),
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    /// Index of the candidate to display.
    pub fn index(&self) -> usize {
        match self {
            MatchResult::Matched(i) | MatchResult::Unmatched(i) => *i,
        }
    }
}

/// Tokens missing from and extra in a declared set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDiff {
    /// In the candidate but not declared.
    pub missing: BTreeSet<String>,
    /// Declared but not in the candidate.
    pub extra: BTreeSet<String>,
}

impl SetDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compare `actual` with each candidate as unordered sets.
pub fn reconcile(actual: &BTreeSet<String>, candidates: &[BTreeSet<String>]) -> MatchResult {
    candidates
        .iter()
        .position(|candidate| candidate == actual)
        .map(MatchResult::Matched)
        .unwrap_or(MatchResult::Unmatched(0))
}

/// `missing = expected − actual`, `extra = actual − expected`.
pub fn diff(expected: &BTreeSet<String>, actual: &BTreeSet<String>) -> SetDiff {
    SetDiff {
        missing: expected.difference(actual).cloned().collect(),
        extra: actual.difference(expected).cloned().collect(),
    }
}

/// A finished comparison for one label, ready for reporting.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// e.g. `build debian ubuntu_24.04 apt client (linux)`.
    pub label: String,
    /// The candidate that matched, or the fallback candidate.
    pub expected: BTreeSet<String>,
    pub actual: BTreeSet<String>,
    pub result: MatchResult,
    /// Present only when nothing matched.
    pub diff: Option<SetDiff>,
}

impl Reconciliation {
    /// Reconcile `actual` against `candidates` under `label`.
    ///
    /// An empty candidate list behaves like a single empty candidate.
    pub fn compute(label: impl Into<String>, actual: &[String], candidates: &[Vec<String>]) -> Self {
        let actual: BTreeSet<String> = actual.iter().cloned().collect();
        let sets: Vec<BTreeSet<String>> = candidates
            .iter()
            .map(|c| c.iter().cloned().collect())
            .collect();

        let result = reconcile(&actual, &sets);
        let expected = sets.get(result.index()).cloned().unwrap_or_default();
        let set_diff = match result {
            MatchResult::Matched(_) => None,
            MatchResult::Unmatched(_) => Some(diff(&expected, &actual)),
        };

        Self {
            label: label.into(),
            expected,
            actual,
            result,
            diff: set_diff,
        }
    }

    /// Whether this comparison should fail the run.
    pub fn is_failure(&self) -> bool {
        self.diff.as_ref().is_some_and(|d| !d.is_empty())
    }
}

/// Add `package` to every candidate that lacks it, but only when the
/// declared list already contains it.
///
/// Whether the package can be installed at all is ambiguous on some
/// package managers, so its absence is not penalised while its presence
/// must still line up.
pub fn include_if_declared(candidates: &mut [Vec<String>], declared: &[String], package: &str) {
    if !declared.iter().any(|d| d == package) {
        return;
    }
    for candidate in candidates.iter_mut() {
        if !candidate.iter().any(|c| c == package) {
            candidate.push(package.to_string());
        }
    }
}
