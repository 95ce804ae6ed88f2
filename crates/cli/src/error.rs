//! Error types for CLI commands

use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Resolution, discovery, generation or exec failure
    #[error(transparent)]
    Tome(#[from] tome_core::Error),

    /// Machine-readable output could not be produced
    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;
