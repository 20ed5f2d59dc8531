//! Built-in checks, in pipeline order.

pub mod build_packages;
pub mod cmake_linkage;
pub mod packager_keys;
pub mod resolver_tool;
pub mod runtime_tools;
pub mod schema_completeness;
pub mod shellcheck;
pub mod workflows;

pub use build_packages::BuildPackagesCheck;
pub use cmake_linkage::CmakeLinkageCheck;
pub use packager_keys::PackagerKeysCheck;
pub use resolver_tool::ResolverToolCheck;
pub use runtime_tools::RuntimeToolsCheck;
pub use schema_completeness::SchemaCompletenessCheck;
pub use shellcheck::ShellcheckCheck;
pub use workflows::WorkflowsCheck;
