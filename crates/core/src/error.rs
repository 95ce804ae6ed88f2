//! Base error types for tome
//!
//! Every stage of the execution pipeline reports through this enum so the CLI
//! can map failures to a non-zero exit without inspecting strings.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Path is not absolute
    #[error("Path must be absolute: {}", path.display())]
    PathNotAbsolute { path: PathBuf },

    /// Path is not relative
    #[error("Path must be relative: {}", path.display())]
    PathNotRelative { path: PathBuf },

    /// Invalid path prefix
    #[error("Path {} is not under base directory {}", path.display(), base.display())]
    InvalidPathPrefix {
        path: Arc<PathBuf>,
        base: Arc<PathBuf>,
    },

    /// Exec was invoked without any path segments
    #[error("No file specified")]
    NoFileSpecified,

    /// None of the argument prefixes named an executable file under the root
    #[error("No executable file found under {} for: {}", root.display(), args.join(" "))]
    NoExecutableFound { root: PathBuf, args: Vec<String> },

    /// The hooks directory exists but could not be enumerated
    #[error("Failed to read hooks directory {}: {source}", path.display())]
    HookDiscovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The wrapper script could not be rendered
    #[error("Failed to generate wrapper script: {0}")]
    WrapperGeneration(String),

    /// A script could not be read for usage or completion metadata
    #[error("Failed to read script {}: {source}", path.display())]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Replacing the current process failed
    #[error("Failed to execute {}: {source}", path.display())]
    Exec {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generated file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A script asked for completions exited unsuccessfully
    #[error("Completion request to {} failed: {reason}", path.display())]
    CompletionFailed { path: PathBuf, reason: String },

    /// Configuration could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
