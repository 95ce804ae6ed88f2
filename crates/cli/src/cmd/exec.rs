//! Exec command implementation
//!
//! Resolve the script, collect hooks, then replace this process. With
//! `--dry-run` the launch plan is printed instead.

use clap::Args;
use tome_engine::{HookLoader, LaunchPlan};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};

/// Exec command
#[derive(Debug, Clone, Default, Args)]
pub struct ExecCommand {
    /// Skip pre-execution hooks
    #[arg(long)]
    pub skip_hooks: bool,

    /// Print the executable, argv, environment and wrapper without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Script path segments followed by the script's own arguments
    #[arg(
        value_name = "PATH_AND_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl ExecCommand {
    /// Exec with default flags, as used for bare `tome-cli <path> [args]`
    pub fn dispatch(args: Vec<String>) -> Self {
        Self {
            args,
            ..Self::default()
        }
    }

    /// Compute what would be executed
    ///
    /// # Errors
    ///
    /// Returns an error if resolution, hook discovery or wrapper generation fails.
    pub fn plan(&self, context: &RuntimeContext) -> Result<LaunchPlan> {
        let resolved = tome_engine::resolve(context.root(), &context.ignore, &self.args)?;

        let hooks = if self.skip_hooks {
            tracing::debug!("Skipping hooks");
            Vec::new()
        } else {
            HookLoader::new(context.root().as_path()).load()?
        };

        Ok(LaunchPlan::build(&context.config, hooks, resolved)?)
    }
}

impl Command for ExecCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let plan = self.plan(context)?;

        if self.dry_run {
            print!("{plan}");
            return Ok(());
        }

        Err(CommandError::from(tome_engine::replace_process(&plan)))
    }
}
