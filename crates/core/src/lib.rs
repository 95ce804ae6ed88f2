//! Core types and utilities for tome
//!
//! This is the foundation crate (Layer 0) that all other tome crates depend on.
//! It provides:
//! - Base error types shared by the execution pipeline
//! - Path types (`AbsPath`, `RelPath`) used to keep scripts anchored under the root
//! - The owner-executable permission check
//!
//! This crate has no dependencies on other tome crates.

pub mod error;
pub mod path;

pub use error::{Error, Result};

/// Check whether the owner-executable bit is set on a file mode
///
/// Only the owner bit counts: a script that is executable by group or others
/// but not by its owner is not considered runnable.
#[cfg(unix)]
#[must_use]
pub fn is_executable_by_owner(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o100 != 0
}

/// Non-unix platforms have no permission bits; fall back to "is a file".
#[cfg(not(unix))]
#[must_use]
pub fn is_executable_by_owner(metadata: &std::fs::Metadata) -> bool {
    metadata.is_file()
}
