// src/errors.rs

//! Crate-wide error types.
//!
//! [`GatewayError`] covers configuration and process execution. A process
//! that runs and fails is *not* an error at this level; it comes back as an
//! `ExecutionResult` with `success = false`. [`ToolError`] is what the tool
//! layer hands to its callers.

use thiserror::Error;

use crate::types::ExecutionResult;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The executable could not be launched at all (not found, permission
    /// denied, ...). Never retried.
    #[error("failed to spawn '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced by [`crate::tools::ToolDispatcher`].
#[derive(Error, Debug)]
pub enum ToolError {
    /// A required parameter for the chosen action was not supplied.
    #[error("{0}")]
    MissingArgument(String),

    /// Mutating tools refuse to run without `yes = true`.
    #[error("{tool} requires yes=true")]
    ConfirmationRequired { tool: &'static str },

    /// The command ran but failed. `message` is stderr, or stdout when
    /// stderr was empty.
    #[error("{message}")]
    CommandFailed {
        message: String,
        result: Box<ExecutionResult>,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
