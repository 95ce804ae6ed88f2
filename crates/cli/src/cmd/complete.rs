//! Hidden completion entry point
//!
//! Shells call `tome-cli __complete <words...> <current>`; the last word is
//! the one being completed and may be empty.

use clap::Args;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Completion command
#[derive(Debug, Clone, Default, Args)]
pub struct CompleteCommand {
    /// Words typed so far, the last one being completed
    #[arg(
        value_name = "WORDS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub words: Vec<String>,
}

impl CompleteCommand {
    /// Split into the completed words and the partial word
    pub fn split(&self) -> (&[String], &str) {
        match self.words.split_last() {
            Some((current, typed)) => (typed, current.as_str()),
            None => (&[], ""),
        }
    }
}

impl Command for CompleteCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let (typed, current) = self.split();
        tracing::debug!(?typed, current, "completing");

        let completions =
            tome_engine::completion::complete(&context.config, &context.ignore, typed, current)?;
        for completion in completions {
            println!("{completion}");
        }
        Ok(())
    }
}
