//! Alias command implementation

use clap::Args;
use std::path::PathBuf;
use tome_engine::alias;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Print or write a launcher pinned to the current root and executable name
#[derive(Debug, Clone, Default, Args)]
pub struct AliasCommand {
    /// Write the launcher to FILE (mode 0744) instead of printing it
    #[arg(short, long, value_name = "FILE")]
    pub write: Option<PathBuf>,
}

impl Command for AliasCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let program = std::env::current_exe().map_err(tome_core::Error::from)?;
        let text = alias::render(&context.config, &program)?;

        match &self.write {
            Some(path) => alias::write(path, &text)?,
            None => print!("{text}"),
        }

        Ok(())
    }
}
