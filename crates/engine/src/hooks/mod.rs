//! Pre-execution hooks
//!
//! Hooks are files in `<root>/.hooks.d/` that run before every script, in
//! filename order. Two kinds exist:
//!
//! - `*.source` files are sourced into the wrapper shell, so anything they
//!   export is visible to the script
//! - other owner-executable files run as child processes
//!
//! A failing hook aborts the run before the script starts.
//!
//! ## Module Organization
//!
//! - `config`: Hook and `HookKind`
//! - `loader`: Hook discovery from the filesystem

pub mod config;
pub mod loader;

pub use config::{Hook, HookKind};
pub use loader::{HOOKS_DIR_NAME, HookLoader, SOURCED_SUFFIX};
