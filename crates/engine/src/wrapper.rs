//! POSIX-shell wrapper generation
//!
//! When hooks exist, the script is launched through a generated `sh` program
//! that exports the tome environment, runs each hook in order, and finally
//! `exec`s the script so the script still replaces the shell process:
//!
//! ```text
//! #!/bin/sh
//! set -e
//! export TOME_ROOT=/srv/scripts
//! ...
//!
//! # Hook: 05-env.source
//! if ! [ -r /srv/scripts/.hooks.d/05-env.source ] || ! . /srv/scripts/.hooks.d/05-env.source; then
//!   echo 'tome: pre-hook failed: 05-env.source (sourced)' >&2
//!   exit 1
//! fi
//!
//! exec /srv/scripts/deploy 'a b'
//! ```
//!
//! Every path, argument and value is quoted before it reaches the text.

use crate::hooks::{Hook, HookKind};
use std::borrow::Cow;
use tome_config::{BASE_ENV_PREFIX, Config};
use tome_core::path::AbsPath;
use tome_core::{Error, Result};

/// Absolute path of the resolved script
pub const SCRIPT_PATH_VAR: &str = "TOME_SCRIPT_PATH";
/// Base name of the resolved script
pub const SCRIPT_NAME_VAR: &str = "TOME_SCRIPT_NAME";
/// Script arguments joined by spaces
pub const SCRIPT_ARGS_VAR: &str = "TOME_SCRIPT_ARGS";

/// Everything needed to render a wrapper
#[derive(Debug, Clone)]
pub struct WrapperSpec {
    /// Hooks in execution order
    pub hooks: Vec<Hook>,
    /// Script to exec once all hooks succeed
    pub script_path: AbsPath,
    /// Arguments for the script
    pub script_args: Vec<String>,
    /// Exported environment, in export order
    pub env: Vec<(String, String)>,
}

impl WrapperSpec {
    /// Build a spec, deriving the environment from the configuration
    pub fn new(
        config: &Config,
        hooks: Vec<Hook>,
        script_path: AbsPath,
        script_args: Vec<String>,
    ) -> Self {
        let env = script_env(config, &script_path, &script_args);
        Self {
            hooks,
            script_path,
            script_args,
            env,
        }
    }
}

/// Environment injected into every script run
///
/// The namespaced `<PREFIX>_*` pair is always emitted, even when it
/// duplicates the `TOME_*` pair.
pub fn script_env(config: &Config, script: &AbsPath, args: &[String]) -> Vec<(String, String)> {
    let root = config.root().to_string();
    let executable = config.executable().to_string();
    let prefix = config.env_prefix();
    let script_name = script
        .as_path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    vec![
        (format!("{BASE_ENV_PREFIX}_ROOT"), root.clone()),
        (format!("{BASE_ENV_PREFIX}_EXECUTABLE"), executable.clone()),
        (format!("{prefix}_ROOT"), root),
        (format!("{prefix}_EXECUTABLE"), executable),
        (SCRIPT_PATH_VAR.to_string(), script.to_string()),
        (SCRIPT_NAME_VAR.to_string(), script_name),
        (SCRIPT_ARGS_VAR.to_string(), args.join(" ")),
    ]
}

/// Render the wrapper for `spec`
///
/// Returns `Ok(None)` when there are no hooks: the script should then be
/// exec'd directly instead of through a shell.
///
/// # Errors
///
/// Returns [`Error::WrapperGeneration`] if an env key is not a shell
/// identifier or a path is not valid UTF-8.
pub fn generate(spec: &WrapperSpec) -> Result<Option<String>> {
    if spec.hooks.is_empty() {
        return Ok(None);
    }

    let mut lines: Vec<String> = vec!["#!/bin/sh".into(), "set -e".into()];

    for (key, value) in &spec.env {
        if !is_shell_identifier(key) {
            return Err(Error::WrapperGeneration(format!(
                "invalid environment variable name: {key:?}"
            )));
        }
        let rendered = if key == SCRIPT_ARGS_VAR {
            double_quote(value)
        } else {
            quote(value).into_owned()
        };
        lines.push(format!("export {key}={rendered}"));
    }
    lines.push(String::new());

    for hook in &spec.hooks {
        let path = quote(utf8_path(hook.path.as_path())?).into_owned();
        let name = single_line(&hook.name);
        // `.` on an unreadable file aborts the shell before the message prints
        let failed = match hook.kind {
            HookKind::Sourced => format!("! [ -r {path} ] || ! . {path}"),
            HookKind::Executed => format!("! {path}"),
        };
        let message = format!("tome: pre-hook failed: {name} ({})", hook.kind);

        lines.push(format!("# Hook: {name}"));
        lines.push(format!("if {failed}; then"));
        lines.push(format!("  echo {} >&2", quote(&message)));
        lines.push("  exit 1".into());
        lines.push("fi".into());
        lines.push(String::new());
    }

    let mut exec_line = format!("exec {}", quote(utf8_path(spec.script_path.as_path())?));
    for arg in &spec.script_args {
        exec_line.push(' ');
        exec_line.push_str(&quote(arg));
    }
    lines.push(exec_line);

    tracing::debug!(hooks = spec.hooks.len(), "generated wrapper script");

    let mut script = lines.join("\n");
    script.push('\n');
    Ok(Some(script))
}

/// Quote a word for POSIX `sh`
///
/// Words made only of safe characters are returned as-is; anything else is
/// single-quoted.
pub fn quote(word: &str) -> Cow<'_, str> {
    shell_words::quote(word)
}

/// Double-quote a value, escaping the characters `sh` still expands inside `"…"`
pub fn double_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Whether `name` is a valid POSIX shell variable name
pub fn is_shell_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn utf8_path(path: &std::path::Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        Error::WrapperGeneration(format!("path is not valid UTF-8: {}", path.display()))
    })
}

fn single_line(name: &str) -> Cow<'_, str> {
    if name.contains(['\n', '\r']) {
        Cow::Owned(name.replace(['\n', '\r'], " "))
    } else {
        Cow::Borrowed(name)
    }
}
