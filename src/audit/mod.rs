//! Cross-references between the dependency data and the rest of the tree.
//!
//! - [`tokens`] - Token normalisation and word-boundary scanning
//! - [`runtime`] - Runtime tools referenced by shell scripts
//! - [`cmake`] - CMake `find_*` directives against declared packages
//! - [`workflow`] - CI installer invocations against `deps-meta.yaml`

pub mod cmake;
pub mod runtime;
pub mod tokens;
pub mod workflow;

pub use cmake::{extract_cmake_deps, unresolved_deps};
pub use runtime::{runtime_tool_tokens, shell_scripts_under, unreferenced_tools};
pub use tokens::{normalize_token, read_lossy, TokenScanner};
pub use workflow::{audit_workflow, audit_workflows, WorkflowContext, WorkflowFinding};
