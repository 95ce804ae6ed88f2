//! CLI command implementations

pub mod alias;
pub mod complete;
pub mod exec;
pub mod help;
pub mod hooks;
