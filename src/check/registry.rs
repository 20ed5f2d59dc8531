//! Ordered registry of checks.
//!
//! Unlike a lookup table, order matters here: checks run and report in
//! registration order, and the schema check must come first.

use super::checks::{
    BuildPackagesCheck, CmakeLinkageCheck, PackagerKeysCheck, ResolverToolCheck,
    RuntimeToolsCheck, SchemaCompletenessCheck, ShellcheckCheck, WorkflowsCheck,
};
use super::rule::{Check, CheckId};

/// Checks in run order.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// The full pipeline.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SchemaCompletenessCheck));
        registry.register(Box::new(BuildPackagesCheck));
        registry.register(Box::new(CmakeLinkageCheck));
        registry.register(Box::new(RuntimeToolsCheck));
        registry.register(Box::new(WorkflowsCheck));
        registry.register(Box::new(PackagerKeysCheck));
        registry.register(Box::new(ResolverToolCheck));
        registry.register(Box::new(ShellcheckCheck));
        registry
    }

    /// Append a check. A check with the same id replaces the earlier one
    /// in place.
    pub fn register(&mut self, check: Box<dyn Check>) {
        let id = check.id();
        match self.checks.iter().position(|c| c.id() == id) {
            Some(index) => self.checks[index] = check,
            None => self.checks.push(check),
        }
    }

    pub fn get(&self, id: &CheckId) -> Option<&dyn Check> {
        self.checks.iter().find(|c| &c.id() == id).map(|c| c.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}
