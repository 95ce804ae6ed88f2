//! tome CLI library
//!
//! This library contains all the CLI logic for `tome-cli`, making it reusable
//! for testing.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tome_config::{Config, ConfigSources};

use cmd::alias::AliasCommand;
use cmd::complete::CompleteCommand;
use cmd::exec::ExecCommand;
use cmd::help::HelpCommand;
use cmd::hooks::HooksListCommand;
use command::Command;
use common::RuntimeContext;

/// tome - run a directory of scripts as subcommands
#[derive(Parser, Debug)]
#[command(name = "tome-cli")]
#[command(about = "Run the executables in a directory tree as subcommands")]
#[command(version)]
#[command(disable_help_subcommand = true)]
#[command(long_about = "Run the executables in a directory tree as subcommands

Every owner-executable file under the root becomes a command: the file
root/db/backup runs as `tome-cli db backup`. Files in root/.hooks.d run
first, in name order; `*.source` hooks are sourced so their exports reach
the script.

Examples:
  • tome-cli db backup production
      → runs root/db/backup with the argument `production`

  • tome-cli exec --dry-run db backup production
      → prints what would run, without running it

  • tome-cli help db backup
      → shows the help block from the script's header comments

  • tome-cli -e ops alias --write ~/bin/ops
      → installs `ops`, a launcher pinned to this root")]
pub struct Cli {
    /// Root directory containing the scripts
    #[arg(short, long, env = "TOME_ROOT", value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Name the tool is invoked as (used for namespaced environment variables)
    #[arg(short, long, env = "TOME_EXECUTABLE", value_name = "NAME", global = true)]
    pub executable: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Write logs to a file
    #[arg(long, env = "TOME_LOG_FILE", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute; without one, all scripts are listed
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a script, after running the hooks in .hooks.d
    Exec(ExecCommand),

    /// List all scripts, or show the help of one script
    Help(HelpCommand),

    /// Inspect pre-execution hooks
    #[command(subcommand)]
    Hooks(HooksCommands),

    /// Print a launcher script that pins the root and executable name
    Alias(AliasCommand),

    /// Print completion candidates for the given words
    #[command(name = "__complete", hide = true)]
    Complete(CompleteCommand),

    /// Any other words are script path segments and arguments
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Hook inspection commands
#[derive(Subcommand, Debug)]
pub enum HooksCommands {
    /// List hooks in execution order
    List(HooksListCommand),
}

fn execute_command(command: Commands, context: &RuntimeContext) -> Result<()> {
    match command {
        Commands::Exec(exec_cmd) => exec_cmd.execute(context)?,
        Commands::Help(help_cmd) => help_cmd.execute(context)?,
        Commands::Hooks(HooksCommands::List(list_cmd)) => list_cmd.execute(context)?,
        Commands::Alias(alias_cmd) => alias_cmd.execute(context)?,
        Commands::Complete(complete_cmd) => complete_cmd.execute(context)?,
        Commands::External(args) => ExecCommand::dispatch(args).execute(context)?,
    }

    Ok(())
}

/// Run the CLI
///
/// Returns only on failure or for commands that do not exec a script.
///
/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - Configuration or the ignore file cannot be loaded
/// - Command execution fails
pub fn run(cli: Cli) -> Result<()> {
    tome_config::logging::init(cli.debug, cli.log_file.as_deref())?;

    let config = Config::load(ConfigSources {
        root: cli.root,
        executable: cli.executable,
        debug: cli.debug,
    })
    .context("Failed to resolve configuration")?;

    let context = RuntimeContext::new(config).context("Failed to load ignore patterns")?;

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Help(HelpCommand::default()));

    execute_command(command, &context)
}
