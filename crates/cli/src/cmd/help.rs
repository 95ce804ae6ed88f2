//! Help command implementation
//!
//! Without arguments, list every script under the root with its usage line.
//! With arguments, show the full help block of the script they resolve to.

use clap::Args;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use tome_engine::ScriptRef;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Help command
#[derive(Debug, Clone, Default, Args)]
pub struct HelpCommand {
    /// Path segments of the script to describe
    #[arg(
        value_name = "PATH",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub path: Vec<String>,
}

impl Command for HelpCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let color = std::io::stdout().is_terminal();

        if self.path.is_empty() {
            let scripts = tome_engine::listing::list_scripts(context.root(), &context.ignore)?;
            print!("{}", render_listing(&scripts, color));
            return Ok(());
        }

        let resolved = tome_engine::resolve(context.root(), &context.ignore, &self.path)?;
        let script = ScriptRef::load(context.root(), resolved.script)?;
        print!("{}", render_script_help(&script, color));
        Ok(())
    }
}

/// One `seg seg: usage` line per script
pub fn render_listing(scripts: &[ScriptRef], color: bool) -> String {
    let mut out = String::new();
    for script in scripts {
        let command = script.command_line();
        if color {
            out.push_str(&command.cyan().bold().to_string());
        } else {
            out.push_str(&command);
        }
        if !script.usage().is_empty() {
            out.push_str(": ");
            out.push_str(script.usage());
        }
        out.push('\n');
    }
    out
}

/// The command line, a `---` rule, then the help block
pub fn render_script_help(script: &ScriptRef, color: bool) -> String {
    let command = script.command_line();
    let header = if color {
        command.cyan().bold().to_string()
    } else {
        command
    };

    let help = if script.help().is_empty() {
        "No help available."
    } else {
        script.help()
    };

    format!("{header}\n---\n{help}\n")
}
