//! Shell completion
//!
//! While the words typed so far name a directory, completions are the
//! entries of that directory. Once they reach a script that mentions
//! `TOME_COMPLETION`, the script itself is asked: it is run with
//! `--completion` and a JSON request in the `TOME_COMPLETION` variable, and
//! prints one `value<TAB>description` line per candidate.

use crate::script::ScriptRef;
use crate::wrapper;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tome_config::{Config, IgnoreMatcher};
use tome_core::path::AbsPath;
use tome_core::{Error, Result};

/// Scripts containing this text opt into delegated completion
pub const COMPLETION_MARKER: &str = "TOME_COMPLETION";

/// Variable carrying the JSON request
pub const COMPLETION_ENV: &str = "TOME_COMPLETION";

/// Flag passed to scripts when asking for completions
pub const COMPLETION_FLAG: &str = "--completion";

/// Request sent to a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Words typed so far, not including the word being completed
    pub args: Vec<String>,
    /// Last complete word (empty when there is none)
    pub last_arg: String,
    /// Partial word under the cursor
    pub current_word: String,
}

impl CompletionRequest {
    /// Build a request from the typed words and the current partial word
    pub fn new(args: Vec<String>, current_word: impl Into<String>) -> Self {
        let last_arg = args.last().cloned().unwrap_or_default();
        Self {
            args,
            last_arg,
            current_word: current_word.into(),
        }
    }
}

/// One completion candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Text inserted on the command line
    pub value: String,
    /// Optional description shown by the shell
    pub description: Option<String>,
}

impl Completion {
    /// Candidate with a description
    pub fn described(value: impl Into<String>, description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            value: value.into(),
            description: (!description.is_empty()).then_some(description),
        }
    }

    /// Parse a `value<TAB>description` line
    ///
    /// Returns `None` for blank lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            return None;
        }
        Some(match line.split_once('\t') {
            Some((value, description)) => Self::described(value, description),
            None => Self {
                value: line.to_string(),
                description: None,
            },
        })
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}\t{description}", self.value),
            None => f.write_str(&self.value),
        }
    }
}

/// Parse a script's completion output
pub fn parse_completions(output: &str) -> Vec<Completion> {
    output.lines().filter_map(Completion::parse_line).collect()
}

/// Ask a script for completions
///
/// `env` is added to the inherited environment along with the request.
///
/// # Errors
///
/// Returns [`Error::CompletionFailed`] if the script cannot be started or
/// exits unsuccessfully.
pub fn request_completions(
    script: &Path,
    request: &CompletionRequest,
    env: &[(String, String)],
) -> Result<Vec<Completion>> {
    let failed = |reason: String| Error::CompletionFailed {
        path: script.to_path_buf(),
        reason,
    };

    let payload = serde_json::to_string(request)
        .map_err(|e| failed(format!("cannot encode request: {e}")))?;
    tracing::debug!(script = %script.display(), request = %payload, "requesting completions");

    let mut command = duct::cmd(script, [COMPLETION_FLAG]).env(COMPLETION_ENV, &payload);
    for (key, value) in env {
        command = command.env(key, value);
    }

    let output = command
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .run()
        .map_err(|e| failed(e.to_string()))?;

    if !output.stderr.is_empty() {
        tracing::debug!(stderr = %String::from_utf8_lossy(&output.stderr), "completion stderr");
    }
    if !output.status.success() {
        return Err(failed(format!("exited with {}", output.status)));
    }

    Ok(parse_completions(&String::from_utf8_lossy(&output.stdout)))
}

/// Complete the word under the cursor
///
/// `args` are the words typed so far; `current_word` is the partial word.
///
/// # Errors
///
/// Returns an error if a delegating script fails or a directory cannot be read.
pub fn complete(
    config: &Config,
    ignore: &IgnoreMatcher,
    args: &[String],
    current_word: &str,
) -> Result<Vec<Completion>> {
    let root = config.root();
    let mut dir = root.clone();

    for (idx, arg) in args.iter().enumerate() {
        if arg.is_empty() || arg.contains('/') || arg == "." || arg == ".." {
            return Ok(Vec::new());
        }
        dir = dir.join_segment(arg);

        let Ok(metadata) = fs::metadata(dir.as_path()) else {
            return Ok(Vec::new());
        };
        if ignore.is_ignored(dir.as_path(), metadata.is_dir()) {
            return Ok(Vec::new());
        }
        if metadata.is_dir() {
            continue;
        }
        if !tome_core::is_executable_by_owner(&metadata) {
            return Ok(Vec::new());
        }

        let script = ScriptRef::load(root, dir.clone())?;
        if !script.has_completions()? {
            tracing::debug!(script = %dir, "script does not provide completions");
            return Ok(Vec::new());
        }
        let request = CompletionRequest::new(args.to_vec(), current_word);
        let env = wrapper::script_env(config, &dir, &args[idx + 1..]);
        return request_completions(dir.as_path(), &request, &env);
    }

    list_entries(root, &dir, ignore, current_word)
}

/// Directory entries starting with `prefix`: subdirectories and executables
fn list_entries(
    root: &AbsPath,
    dir: &AbsPath,
    ignore: &IgnoreMatcher,
    prefix: &str,
) -> Result<Vec<Completion>> {
    let mut names: Vec<String> = fs::read_dir(dir.as_path())?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(prefix) && !name.starts_with('.'))
        .collect();
    names.sort();

    let mut completions = Vec::new();
    for name in names {
        let path = dir.join_segment(&name);
        let Ok(metadata) = fs::metadata(path.as_path()) else {
            continue;
        };
        if ignore.is_ignored(path.as_path(), metadata.is_dir()) {
            continue;
        }

        if metadata.is_dir() {
            completions.push(Completion::described(name, "directory"));
        } else if metadata.is_file() && tome_core::is_executable_by_owner(&metadata) {
            let usage = match ScriptRef::load(root, path) {
                Ok(script) => script.usage().to_string(),
                Err(e) => {
                    tracing::debug!("Failed to read usage for completion: {e}");
                    String::new()
                }
            };
            completions.push(Completion::described(name, usage));
        }
    }

    Ok(completions)
}
