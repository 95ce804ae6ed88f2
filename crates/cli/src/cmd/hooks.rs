//! Hook inspection commands

use clap::{Args, ValueEnum};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use tome_engine::{Hook, HookLoader};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Output format for `hooks list`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per hook
    #[default]
    Simple,
    /// Pretty-printed JSON
    Json,
}

/// List hooks in execution order
#[derive(Debug, Clone, Default, Args)]
pub struct HooksListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Simple)]
    pub format: OutputFormat,
}

impl Command for HooksListCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let loader = HookLoader::new(context.root().as_path());
        let hooks = loader.load()?;

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "hooks_dir": loader.hooks_dir(),
                    "hooks": hooks,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Simple => {
                if !loader.exists() {
                    println!("{}", "No hooks directory found.".yellow());
                    return Ok(());
                }
                print!(
                    "{}",
                    render_simple(&loader, &hooks, std::io::stdout().is_terminal())
                );
            }
        }

        Ok(())
    }
}

fn render_simple(loader: &HookLoader, hooks: &[Hook], color: bool) -> String {
    let dir = loader.hooks_dir().display().to_string();
    let mut out = if color {
        format!("Hooks directory: {}\n", dir.cyan())
    } else {
        format!("Hooks directory: {dir}\n")
    };

    if hooks.is_empty() {
        out.push_str("No hooks configured.\n");
        return out;
    }

    for hook in hooks {
        if color {
            out.push_str(&format!("  • {} ({})\n", hook.name.green(), hook.kind.dimmed()));
        } else {
            out.push_str(&format!("  • {} ({})\n", hook.name, hook.kind));
        }
    }
    out
}
