//! The terminal step of the pipeline: replacing this process with the script
//!
//! A [`LaunchPlan`] is computed first and can be printed for `--dry-run`.
//! [`replace_process`] then hands the process over; it only ever returns
//! when the replacement failed.

use crate::hooks::Hook;
use crate::resolver::Resolved;
use crate::wrapper::{self, WrapperSpec};
use std::fmt;
use std::path::{Path, PathBuf};
use tome_config::Config;
use tome_core::{Error, Result};

/// Shell used to run generated wrappers
pub const WRAPPER_SHELL: &str = "/bin/sh";

/// What to exec, with which argv and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    /// No hooks: exec the script itself
    Direct {
        /// Script path
        program: PathBuf,
        /// Full argv, starting with the script path
        argv: Vec<String>,
        /// Injected environment
        env: Vec<(String, String)>,
    },
    /// Hooks present: exec `sh -c <wrapper>`, which execs the script last
    Wrapped {
        /// The POSIX shell
        program: PathBuf,
        /// `["sh", "-c", <wrapper>, <script path>]`
        argv: Vec<String>,
        /// Injected environment (also exported by the wrapper)
        env: Vec<(String, String)>,
        /// The script the wrapper finally execs
        script: PathBuf,
        /// Script arguments, as passed to the final exec
        script_args: Vec<String>,
    },
}

impl LaunchPlan {
    /// Build the plan for a resolved script and its hooks
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrapperGeneration`] if the wrapper cannot be rendered.
    pub fn build(config: &Config, hooks: Vec<Hook>, resolved: Resolved) -> Result<Self> {
        let spec = WrapperSpec::new(config, hooks, resolved.script, resolved.args);

        match wrapper::generate(&spec)? {
            None => {
                let program = spec.script_path.into_path_buf();
                let mut argv = Vec::with_capacity(spec.script_args.len() + 1);
                argv.push(program.to_string_lossy().into_owned());
                argv.extend(spec.script_args);
                Ok(Self::Direct {
                    program,
                    argv,
                    env: spec.env,
                })
            }
            Some(script_text) => {
                let script = spec.script_path.into_path_buf();
                let argv = vec![
                    "sh".to_string(),
                    "-c".to_string(),
                    script_text,
                    script.to_string_lossy().into_owned(),
                ];
                Ok(Self::Wrapped {
                    program: PathBuf::from(WRAPPER_SHELL),
                    argv,
                    env: spec.env,
                    script,
                    script_args: spec.script_args,
                })
            }
        }
    }

    /// The program handed to exec
    pub fn program(&self) -> &Path {
        match self {
            Self::Direct { program, .. } | Self::Wrapped { program, .. } => program,
        }
    }

    /// The argv handed to exec, including argv[0]
    pub fn argv(&self) -> &[String] {
        match self {
            Self::Direct { argv, .. } | Self::Wrapped { argv, .. } => argv,
        }
    }

    /// Environment added on top of the inherited one
    pub fn env(&self) -> &[(String, String)] {
        match self {
            Self::Direct { env, .. } | Self::Wrapped { env, .. } => env,
        }
    }

    /// The generated wrapper, if hooks are involved
    pub fn wrapper(&self) -> Option<&str> {
        match self {
            Self::Direct { .. } => None,
            Self::Wrapped { argv, .. } => argv.get(2).map(String::as_str),
        }
    }
}

/// Dry-run report
///
/// ```text
/// executable: /srv/scripts/deploy
/// argv: /srv/scripts/deploy prod 'a b'
/// env:
///   TOME_ROOT=/srv/scripts
///   ...
/// ```
///
/// With hooks, the script and its args are shown as the wrapper will exec
/// them, followed by the wrapper text.
impl fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (executable, args) = match self {
            Self::Direct { program, argv, .. } => {
                (program.as_path(), argv.get(1..).unwrap_or_default())
            }
            Self::Wrapped {
                script,
                script_args,
                ..
            } => (script.as_path(), script_args.as_slice()),
        };

        writeln!(f, "executable: {}", executable.display())?;
        write!(f, "argv: {}", wrapper::quote(&executable.to_string_lossy()))?;
        for arg in args {
            write!(f, " {}", wrapper::quote(arg))?;
        }
        writeln!(f)?;

        writeln!(f, "env:")?;
        for (key, value) in self.env() {
            writeln!(f, "  {key}={}", wrapper::quote(value))?;
        }

        if let Some(text) = self.wrapper() {
            writeln!(f, "wrapper ({WRAPPER_SHELL}):")?;
            write!(f, "{text}")?;
        }
        Ok(())
    }
}

/// Replace the current process according to `plan`
///
/// On success this never returns: the process image is replaced, keeping the
/// PID and the inherited stdin/stdout/stderr. The returned value is always
/// the reason the replacement failed.
#[cfg(unix)]
pub fn replace_process(plan: &LaunchPlan) -> Error {
    use std::os::unix::process::CommandExt;

    let argv = plan.argv();
    let mut command = std::process::Command::new(plan.program());
    if let Some((arg0, rest)) = argv.split_first() {
        command.arg0(arg0).args(rest);
    }
    command.envs(plan.env().iter().map(|(k, v)| (k, v)));

    tracing::debug!(program = %plan.program().display(), args = argv.len(), "replacing process");
    let source = command.exec();

    Error::Exec {
        path: plan.program().to_path_buf(),
        source,
    }
}

/// Without `execve`, run the program as a child and exit with its status.
#[cfg(not(unix))]
pub fn replace_process(plan: &LaunchPlan) -> Error {
    let argv = plan.argv();
    let mut command = std::process::Command::new(plan.program());
    command
        .args(argv.get(1..).unwrap_or_default())
        .envs(plan.env().iter().map(|(k, v)| (k, v)));

    match command.status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(source) => Error::Exec {
            path: plan.program().to_path_buf(),
            source,
        },
    }
}
