//! Runtime configuration
//!
//! The configuration is resolved exactly once at startup from command-line
//! values, environment variables and defaults, and is immutable afterwards.
//! Every component receives it by reference.

use crate::Result;
use std::path::{Path, PathBuf};
use tome_core::path::AbsPath;

/// Prefix shared by every tome instance, regardless of the executable name
pub const BASE_ENV_PREFIX: &str = "TOME";

/// Executable name used when the running binary's name cannot be determined
pub const DEFAULT_EXECUTABLE: &str = "tome-cli";

/// Raw configuration inputs before resolution
///
/// These come straight from the command line (clap already folds in the
/// `TOME_ROOT` / `TOME_EXECUTABLE` environment fallbacks).
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Root directory as given on the command line
    pub root: Option<PathBuf>,
    /// Executable name as given on the command line
    pub executable: Option<String>,
    /// Enable debug output
    pub debug: bool,
}

/// Resolved, immutable configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    root: AbsPath,
    executable: String,
    env_prefix: String,
    debug: bool,
}

impl Config {
    /// Build a configuration from already-resolved values
    pub fn new(root: AbsPath, executable: impl Into<String>) -> Self {
        let executable = executable.into();
        Self {
            env_prefix: env_prefix(&executable),
            root,
            executable,
            debug: false,
        }
    }

    /// Enable or disable debug mode
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Resolve configuration from sources and the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be made absolute.
    pub fn load(sources: ConfigSources) -> Result<Self> {
        Self::load_with_env(sources, |key| std::env::var(key).ok())
    }

    /// Resolve configuration using a custom environment lookup
    ///
    /// Precedence, highest first:
    /// 1. `<PREFIX>_ROOT` / `<PREFIX>_EXECUTABLE`, where `<PREFIX>` is derived
    ///    from the executable name. This lets differently-named installs of
    ///    the tool point at different roots from the same shell.
    /// 2. The command-line value (which already includes the `TOME_*` env fallback).
    /// 3. Defaults: `.` for the root, the running binary's file name for the executable.
    ///
    /// Empty environment values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be made absolute.
    pub fn load_with_env<F>(sources: ConfigSources, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mut executable = sources
            .executable
            .filter(|e| !e.is_empty())
            .unwrap_or_else(current_executable_name);
        let prefix = env_prefix(&executable);
        if let Some(namespaced) = lookup(&format!("{prefix}_EXECUTABLE")) {
            tracing::debug!(key = %format!("{prefix}_EXECUTABLE"), "executable overridden by namespaced env");
            executable = namespaced;
        }

        // The prefix is re-derived so the root lookup follows the final name
        let prefix = env_prefix(&executable);
        let root = match lookup(&format!("{prefix}_ROOT")) {
            Some(root) => {
                tracing::debug!(key = %format!("{prefix}_ROOT"), "root overridden by namespaced env");
                PathBuf::from(root)
            }
            None => sources.root.unwrap_or_else(|| PathBuf::from(".")),
        };

        let root = AbsPath::resolve(&root).map_err(|e| {
            tome_core::Error::Config(format!(
                "Unable to determine absolute path for root directory {}: {e}",
                root.display()
            ))
        })?;
        tracing::debug!(root = %root, executable = %executable, "configuration resolved");

        Ok(Self::new(root, executable).with_debug(sources.debug))
    }

    /// The root directory containing scripts
    #[inline]
    pub fn root(&self) -> &AbsPath {
        &self.root
    }

    /// The name this tool is invoked as
    #[inline]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Upper-cased, shell-safe form of the executable name
    #[inline]
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Whether debug output is enabled
    #[inline]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Path of a file or directory directly under the root
    pub fn root_join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root.as_path().join(name)
    }
}

fn current_executable_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string())
}

/// Convert an executable name into an environment variable prefix
///
/// The result is SCREAMING_SNAKE_CASE and always a valid shell identifier:
/// camel-case boundaries become `_`, every other non-alphanumeric character
/// becomes `_`, repeated underscores collapse, and a leading digit (or an
/// empty result) gets a `_` prefix.
///
/// ```
/// use tome_config::config::env_prefix;
///
/// assert_eq!(env_prefix("tome-cli"), "TOME_CLI");
/// assert_eq!(env_prefix("myTool.sh"), "MY_TOOL_SH");
/// assert_eq!(env_prefix("9lives"), "_9LIVES");
/// ```
pub fn env_prefix(executable: &str) -> String {
    let mut out = String::with_capacity(executable.len() + 4);
    let mut prev_lower_or_digit = false;

    for c in executable.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower_or_digit {
                out.push('_');
            }
            out.push(c.to_ascii_uppercase());
            prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        } else {
            if !out.ends_with('_') {
                out.push('_');
            }
            prev_lower_or_digit = false;
        }
    }

    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() || trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{trimmed}")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_env_prefix_kebab_and_snake() {
        assert_eq!(env_prefix("tome-cli"), "TOME_CLI");
        assert_eq!(env_prefix("my_custom_cli"), "MY_CUSTOM_CLI");
        assert_eq!(env_prefix("my-custom-cli"), "MY_CUSTOM_CLI");
    }

    #[test]
    fn test_env_prefix_camel_case_and_symbols() {
        assert_eq!(env_prefix("myTool"), "MY_TOOL");
        assert_eq!(env_prefix("wrapper.sh"), "WRAPPER_SH");
        assert_eq!(env_prefix("a--b  c"), "A_B_C");
        assert_eq!(env_prefix("HTTPServer"), "HTTPSERVER");
    }

    #[test]
    fn test_env_prefix_is_shell_identifier() {
        assert_eq!(env_prefix(""), "_");
        assert_eq!(env_prefix("---"), "_");
        assert_eq!(env_prefix("2fa"), "_2FA");
        assert_eq!(env_prefix("ünïcode"), "N_CODE");
    }

    #[test]
    fn test_load_uses_sources() {
        let temp = TempDir::new().unwrap();
        let sources = ConfigSources {
            root: Some(temp.path().to_path_buf()),
            executable: Some("kit".into()),
            debug: true,
        };

        let config = Config::load_with_env(sources, |_| None).unwrap();

        assert_eq!(
            config.root().as_path(),
            std::fs::canonicalize(temp.path()).unwrap()
        );
        assert_eq!(config.executable(), "kit");
        assert_eq!(config.env_prefix(), "KIT");
        assert!(config.debug());
    }

    #[test]
    fn test_namespaced_root_overrides_flag() {
        let flag_root = TempDir::new().unwrap();
        let env_root = TempDir::new().unwrap();
        let vars = env(&[("OPS_KIT_ROOT", env_root.path().to_str().unwrap())]);
        let sources = ConfigSources {
            root: Some(flag_root.path().to_path_buf()),
            executable: Some("ops-kit".into()),
            debug: false,
        };

        let config = Config::load_with_env(sources, |k| vars.get(k).cloned()).unwrap();

        assert_eq!(
            config.root().as_path(),
            std::fs::canonicalize(env_root.path()).unwrap()
        );
    }

    #[test]
    fn test_empty_namespaced_value_is_ignored() {
        let flag_root = TempDir::new().unwrap();
        let vars = env(&[("OPS_ROOT", "")]);
        let sources = ConfigSources {
            root: Some(flag_root.path().to_path_buf()),
            executable: Some("ops".into()),
            debug: false,
        };

        let config = Config::load_with_env(sources, |k| vars.get(k).cloned()).unwrap();

        assert_eq!(
            config.root().as_path(),
            std::fs::canonicalize(flag_root.path()).unwrap()
        );
    }

    #[test]
    fn test_namespaced_executable_override() {
        let vars = env(&[("OPS_EXECUTABLE", "ops-renamed")]);
        let sources = ConfigSources {
            root: Some(PathBuf::from("/")),
            executable: Some("ops".into()),
            debug: false,
        };

        let config = Config::load_with_env(sources, |k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.executable(), "ops-renamed");
        assert_eq!(config.env_prefix(), "OPS_RENAMED");
    }

    #[test]
    fn test_missing_executable_falls_back_to_binary_name() {
        let sources = ConfigSources {
            root: Some(PathBuf::from("/")),
            executable: None,
            debug: false,
        };

        let config = Config::load_with_env(sources, |_| None).unwrap();
        assert!(!config.executable().is_empty());
    }
}
