//! The [`Check`] trait and check identifiers.

use super::context::CheckContext;
use super::report::Report;
use crate::error::Result;

/// Unique identifier for a check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckId(pub String);

impl CheckId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One pass of the audit pipeline.
///
/// A check writes its own section headers. Findings go into the returned
/// report; `Err` is reserved for failures that make further checking
/// meaningless, such as unreadable files.
pub trait Check {
    fn id(&self) -> CheckId;

    /// Human-readable name.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Report>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_id_equality() {
        assert_eq!(CheckId::new("cmake"), CheckId::new("cmake"));
        assert_ne!(CheckId::new("cmake"), CheckId::new("workflows"));
    }

    #[test]
    fn check_id_display() {
        assert_eq!(CheckId::new("runtime-tools").to_string(), "runtime-tools");
    }
}
