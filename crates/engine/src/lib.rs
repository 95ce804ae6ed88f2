//! # Tome Engine
//!
//! The execution pipeline behind the `tome-cli` binary.
//!
//! - **Resolution**: map command-line words onto a script under the root
//! - **Hooks**: discover `.hooks.d` entries and classify them
//! - **Wrapper**: render the POSIX-shell program that runs hooks, then the script
//! - **Launch**: compute the final exec and replace the process
//! - **Usage**: read usage and help from a script's header comments
//! - **Completion**: list candidates or delegate to a script
//! - **Listing**: enumerate every script for the help overview
//! - **Alias**: render launchers that pin a name and root

pub mod alias;
pub mod completion;
pub mod hooks;
pub mod launch;
pub mod listing;
pub mod resolver;
pub mod script;
pub mod usage;
pub mod wrapper;

// Re-export path types from core
pub use tome_core::path::{AbsPath, RelPath};

// Re-export error types from core
pub use tome_core::{Error, Result};

// Re-export commonly used types
pub use completion::{Completion, CompletionRequest};
pub use hooks::{Hook, HookKind, HookLoader};
pub use launch::{LaunchPlan, replace_process};
pub use resolver::{Resolved, resolve};
pub use script::ScriptRef;
pub use usage::UsageInfo;
pub use wrapper::WrapperSpec;
