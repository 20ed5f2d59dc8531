//! Error types for depaudit operations.
//!
//! This module defines [`DepauditError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Structural problems in the input data abort the run immediately
//! - Collaborator failures and mismatches are *not* errors at this level;
//!   they are recorded in a [`Report`](crate::check::Report) and the run continues
//! - Use `anyhow::Error` (via `DepauditError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for depaudit operations.
#[derive(Debug, Error)]
pub enum DepauditError {
    /// A required input file does not exist.
    #[error("Missing required file: {path}")]
    InputNotFound { path: PathBuf },

    /// An input file could not be parsed.
    #[error("Invalid YAML: {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A required key or section is absent from a dependency document.
    #[error("{message}")]
    Structural { message: String },

    /// An external script or tool could not be run.
    #[error("Failed to run {command}: {message}")]
    CollaboratorFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DepauditError {
    /// Process exit code for this error.
    ///
    /// Schema violations exit with 1, unreadable or missing input with 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            DepauditError::Structural { .. } => 1,
            DepauditError::InputNotFound { .. } | DepauditError::ParseError { .. } => 2,
            DepauditError::CollaboratorFailed { .. }
            | DepauditError::Io(_)
            | DepauditError::Other(_) => 1,
        }
    }
}

/// Result type alias for depaudit operations.
pub type Result<T> = std::result::Result<T, DepauditError>;
