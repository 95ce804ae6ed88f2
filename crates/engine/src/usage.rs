//! Usage and help extraction from script header comments
//!
//! A script documents itself in the comment block right after its shebang:
//!
//! ```text
//! #!/usr/bin/env bash
//! # USAGE: $0 <environment> [--force]
//! # Deploy the current branch.
//! #
//! #   --force   skip the confirmation prompt
//! ```
//!
//! The marker line becomes the one-line usage, the marker line plus every
//! following comment line becomes the help text. `SUMMARY:` is accepted as a
//! legacy spelling of `USAGE:`.

use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;
use tome_core::{Error, Result};

/// Marker that starts the usage block
pub const USAGE_MARKER: &str = "USAGE:";

/// Older spelling of [`USAGE_MARKER`]
pub const LEGACY_USAGE_MARKER: &str = "SUMMARY:";

/// Scripts are only scanned this far; the header is always near the top.
const HEADER_READ_LIMIT: u64 = 64 * 1024;

/// Leading comment characters for `#`, `//`, `--` and `/* */` style comments
static COMMENT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[/*\-#]+").expect("Failed to compile comment prefix pattern"));

static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "(?:{}|{})",
        regex::escape(USAGE_MARKER),
        regex::escape(LEGACY_USAGE_MARKER)
    ))
    .expect("Failed to compile usage marker pattern")
});

/// Internal tome tokens such as `TOME_COMPLETION` never belong in usage text
static INTERNAL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TOME_[A-Z_]+").expect("Failed to compile internal token pattern"));

/// Usage line and help block of a single script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageInfo {
    /// One-line usage, stripped of the marker and the script's own name
    pub usage: String,
    /// Full dedented help block starting at the marker line
    pub help: String,
}

impl UsageInfo {
    /// Read the header of a script file and extract its usage
    ///
    /// Binary content is decoded lossily; it simply yields no usage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScriptRead`] if the file cannot be opened or read.
    pub fn from_file(path: &Path) -> Result<Self> {
        let read_error = |source| Error::ScriptRead {
            path: path.to_path_buf(),
            source,
        };

        let mut head = Vec::new();
        File::open(path)
            .map_err(read_error)?
            .take(HEADER_READ_LIMIT)
            .read_to_end(&mut head)
            .map_err(read_error)?;

        let script_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(parse_usage(&String::from_utf8_lossy(&head), &script_name))
    }

    /// Whether the script declared no usage at all
    pub fn is_empty(&self) -> bool {
        self.usage.is_empty() && self.help.is_empty()
    }
}

/// Extract usage and help from script text
///
/// Only the comment run directly following the shebang (or starting on the
/// first line if there is no shebang) is considered. Both fields are empty
/// when that run has no marker line.
///
/// ```
/// use tome_engine::usage::parse_usage;
///
/// let info = parse_usage("#!/bin/bash\n# USAGE: $0 <arg>\n# help line\n\necho 1\n", "greet");
/// assert_eq!(info.usage, "<arg>");
/// assert!(info.help.contains("help line"));
/// ```
pub fn parse_usage(text: &str, script_name: &str) -> UsageInfo {
    let mut lines = text.lines().peekable();
    if lines.peek().is_some_and(|line| line.starts_with("#!")) {
        lines.next();
    }

    let comment_run: Vec<&str> = lines
        .take_while(|line| COMMENT_PREFIX.is_match(line))
        .collect();

    let Some(start) = comment_run
        .iter()
        .position(|line| MARKER_PATTERN.is_match(line))
    else {
        return UsageInfo::default();
    };

    let block: Vec<&str> = comment_run[start..]
        .iter()
        .map(|line| strip_comment_prefix(line))
        .collect();

    UsageInfo {
        usage: clean_usage_line(block[0], script_name),
        help: dedent(&block).join("\n"),
    }
}

fn strip_comment_prefix(line: &str) -> &str {
    let body = match COMMENT_PREFIX.find(line) {
        Some(prefix) => &line[prefix.end()..],
        None => line,
    };
    body.trim_end()
}

fn clean_usage_line(line: &str, script_name: &str) -> String {
    let without_marker = MARKER_PATTERN.replace_all(line, "");
    let without_internal = INTERNAL_TOKEN.replace_all(&without_marker, "");

    without_internal
        .split(char::is_whitespace)
        .filter(|word| *word != "$0" && (script_name.is_empty() || *word != script_name))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Remove the indentation shared by every non-blank line
///
/// Only ASCII spaces and tabs count as indentation. Blank lines become empty
/// and do not count towards the common indentation.
pub fn dedent<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[indent..]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_usage_and_help() {
        let text = "#!/bin/bash\n# USAGE: $0 <arg>\n# help line\n\necho 1\n";
        let info = parse_usage(text, "greet");

        assert_eq!(info.usage, "<arg>");
        assert_eq!(info.help, "USAGE: $0 <arg>\nhelp line");
    }

    #[test]
    fn test_no_marker_yields_empty() {
        let text = "#!/bin/bash\n# just a comment\n# another\necho hi\n";
        let info = parse_usage(text, "x");

        assert!(info.is_empty());
    }

    #[test]
    fn test_code_after_shebang_yields_empty() {
        let text = "#!/bin/sh\necho hi\n# USAGE: too late\n";
        assert!(parse_usage(text, "x").is_empty());
    }

    #[test]
    fn test_marker_after_leading_comments() {
        let text = "#!/bin/sh\n# shellcheck disable=SC2034\n# USAGE: <name>\n# Greets.\n";
        let info = parse_usage(text, "x");

        assert_eq!(info.usage, "<name>");
        assert_eq!(info.help, "USAGE: <name>\nGreets.");
    }

    #[test]
    fn test_legacy_summary_marker() {
        let info = parse_usage("#!/bin/sh\n# SUMMARY: does things\n", "x");
        assert_eq!(info.usage, "does things");
    }

    #[test]
    fn test_script_name_and_internal_tokens_removed() {
        let text = "#!/bin/sh\n# USAGE: deploy <env> TOME_COMPLETION\n";
        let info = parse_usage(text, "deploy");

        assert_eq!(info.usage, "<env>");
    }

    #[test]
    fn test_script_name_only_removed_as_whole_word() {
        let info = parse_usage("#!/bin/sh\n# USAGE: a <arg> [b-a]\n", "a");
        assert_eq!(info.usage, "<arg> [b-a]");
    }

    #[test]
    fn test_other_comment_styles() {
        let js = "#!/usr/bin/env node\n// USAGE: <file>\n// Lints a file.\n";
        assert_eq!(parse_usage(js, "lint").usage, "<file>");

        let lua = "#!/usr/bin/env lua\n-- USAGE: <n>\n";
        assert_eq!(parse_usage(lua, "count").usage, "<n>");
    }

    #[test]
    fn test_help_keeps_relative_indentation() {
        let text = "#!/bin/sh\n# USAGE: <x>\n#\n#   --force  skip checks\n";
        let info = parse_usage(text, "x");

        assert_eq!(info.help, "USAGE: <x>\n\n  --force  skip checks");
    }

    #[test]
    fn test_usage_keeps_inner_spacing() {
        let info = parse_usage("#!/bin/sh\n# USAGE: $0 <a>   [--b]  \n", "x");
        assert_eq!(info.usage, "<a>   [--b]");
    }

    #[test]
    fn test_help_with_non_ascii_indentation() {
        let text = "#!/bin/sh\n# USAGE: <x>\n#\u{a0}indented with nbsp\n";
        let info = parse_usage(text, "x");

        assert_eq!(info.usage, "<x>");
        assert_eq!(info.help, " USAGE: <x>\n\u{a0}indented with nbsp");
    }

    #[test]
    fn test_dedent_ignores_unicode_whitespace() {
        let lines = ["  a", "\u{2003}\u{2003}b"];
        assert_eq!(dedent(&lines), vec!["  a", "\u{2003}\u{2003}b"]);
    }

    #[test]
    fn test_no_shebang() {
        let info = parse_usage("# USAGE: <y>\necho\n", "x");
        assert_eq!(info.usage, "<y>");
    }

    #[test]
    fn test_dedent() {
        let lines = ["    a", "      b", "", "    c"];
        assert_eq!(dedent(&lines), vec!["a", "  b", "", "c"]);
    }

    #[test]
    fn test_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("backup");
        fs::write(&path, "#!/bin/sh\n# USAGE: backup <db>\n").unwrap();

        let info = UsageInfo::from_file(&path).unwrap();
        assert_eq!(info.usage, "<db>");
    }

    #[test]
    fn test_from_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = UsageInfo::from_file(&temp.path().join("nope")).unwrap_err();

        assert!(matches!(err, Error::ScriptRead { .. }));
    }
}
