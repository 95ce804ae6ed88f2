//! Configuration management for tome
//!
//! This crate handles:
//! - Resolving the immutable runtime [`Config`] (root directory, executable name)
//! - Deriving shell-safe environment prefixes from the executable name
//! - Loading `.tomeignore` patterns
//! - Logging initialization

pub mod config;
pub mod ignores;
pub mod logging;

// Re-export error types from core
pub use tome_core::{Error, Result};

pub use config::{BASE_ENV_PREFIX, Config, ConfigSources, env_prefix};
pub use ignores::{IGNORE_FILE_NAME, IgnoreMatcher};
