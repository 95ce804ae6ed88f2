//! Shared state for CLI commands

use std::sync::Arc;
use tome_config::{Config, IgnoreMatcher};
use tome_core::Result;
use tome_core::path::AbsPath;

/// Runtime context for CLI commands
///
/// Built once in [`crate::run`] and handed to every command. Configuration
/// and the ignore matcher are shared via `Arc` and never change afterwards.
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    /// Resolved configuration
    pub config: Arc<Config>,
    /// Patterns from `<root>/.tomeignore`
    pub ignore: Arc<IgnoreMatcher>,
}

impl RuntimeContext {
    /// Create a context, loading the ignore file from the configured root
    ///
    /// # Errors
    ///
    /// Returns an error if `.tomeignore` exists but cannot be read or parsed.
    pub fn new(config: Config) -> Result<Self> {
        let ignore = IgnoreMatcher::load(config.root())?;
        Ok(Self::from_parts(Arc::new(config), Arc::new(ignore)))
    }

    /// Create a context from already-built parts
    pub fn from_parts(config: Arc<Config>, ignore: Arc<IgnoreMatcher>) -> Self {
        Self { config, ignore }
    }

    /// Get the root directory
    #[inline]
    pub fn root(&self) -> &AbsPath {
        self.config.root()
    }
}
