//! Hook definitions

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// How a hook participates in the wrapper shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    /// Sourced with `.`, sharing the wrapper's environment
    Sourced,
    /// Run as a separate process
    Executed,
}

impl HookKind {
    /// Get the string name of this hook kind
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            HookKind::Sourced => "sourced",
            HookKind::Executed => "executed",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single discovered hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hook {
    /// File name inside the hooks directory, used for ordering and messages
    pub name: String,

    /// Absolute path to the hook file
    pub path: PathBuf,

    /// Sourced or executed
    pub kind: HookKind,
}

impl Hook {
    /// Whether this hook is sourced into the wrapper shell
    #[must_use]
    pub fn is_sourced(&self) -> bool {
        self.kind == HookKind::Sourced
    }
}
