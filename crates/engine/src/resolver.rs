//! Map command-line words onto a script under the root
//!
//! Words are appended to the root one at a time. The first prefix naming an
//! owner-executable regular file is the script, and everything after it is
//! passed through as the script's arguments:
//!
//! ```text
//! root/
//! └── a/
//!     └── b          (executable)
//!
//! tome-cli a b c    →  script root/a/b, args ["c"]
//! ```

use std::fs;
use std::path::{Component, Path};
use tome_config::IgnoreMatcher;
use tome_core::path::AbsPath;
use tome_core::{Error, Result};

/// A script path plus the arguments that follow it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Absolute path of the script to run
    pub script: AbsPath,
    /// Remaining words, passed through unchanged
    pub args: Vec<String>,
}

/// Resolve `args` against `root`
///
/// Ignored paths are never selected. A word that would escape the root
/// (`..`, an absolute path) ends the search.
///
/// # Errors
///
/// - [`Error::NoFileSpecified`] when `args` is empty
/// - [`Error::NoExecutableFound`] when no prefix names an executable file
pub fn resolve(root: &AbsPath, ignore: &IgnoreMatcher, args: &[String]) -> Result<Resolved> {
    if args.is_empty() {
        return Err(Error::NoFileSpecified);
    }

    let mut candidate = root.clone();
    for (idx, segment) in args.iter().enumerate() {
        if !is_plain_segment(segment) {
            tracing::debug!(segment = %segment, "segment would leave the root, stopping");
            break;
        }
        candidate = candidate.join_segment(segment);

        let Ok(metadata) = fs::metadata(candidate.as_path()) else {
            tracing::debug!(path = %candidate, "candidate does not exist");
            break;
        };

        if ignore.is_ignored(candidate.as_path(), metadata.is_dir()) {
            tracing::debug!(path = %candidate, "candidate is ignored");
            continue;
        }

        if metadata.is_dir() {
            continue;
        }

        if metadata.is_file() && tome_core::is_executable_by_owner(&metadata) {
            tracing::debug!(script = %candidate, consumed = idx + 1, "resolved script");
            return Ok(Resolved {
                script: candidate,
                args: args[idx + 1..].to_vec(),
            });
        }

        // Nothing can live beneath a non-executable file
        tracing::debug!(path = %candidate, "candidate is not executable");
        break;
    }

    Err(Error::NoExecutableFound {
        root: root.as_path().to_path_buf(),
        args: args.to_vec(),
    })
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && Path::new(segment)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(all(test, unix))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn root_of(temp: &TempDir) -> AbsPath {
        AbsPath::new(fs::canonicalize(temp.path()).unwrap()).unwrap()
    }

    fn write_script(root: &AbsPath, rel: &str, mode: u32) {
        let path = root.as_path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "#!/bin/sh\necho ok\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    }

    fn words(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_nested_script_with_args() {
        let temp = TempDir::new().unwrap();
        let root = root_of(&temp);
        write_script(&root, "a/b", 0o755);

        let resolved = resolve(&root, &IgnoreMatcher::empty(), &words(&["a", "b", "c"])).unwrap();

        assert_eq!(resolved.script.as_path(), root.as_path().join("a/b"));
        assert_eq!(resolved.args, vec!["c"]);
    }

    #[test]
    fn test_args_pass_through_unchanged() {
        let temp = TempDir::new().unwrap();
        let root = root_of(&temp);
        write_script(&root, "run", 0o755);

        let resolved = resolve(
            &root,
            &IgnoreMatcher::empty(),
            &words(&["run", "a b", "--flag", "", "$HOME"]),
        )
        .unwrap();

        assert_eq!(resolved.args, vec!["a b", "--flag", "", "$HOME"]);
    }

    #[test]
    fn test_empty_args() {
        let temp = TempDir::new().unwrap();
        let root = root_of(&temp);

        let err = resolve(&root, &IgnoreMatcher::empty(), &[]).unwrap_err();
        assert!(matches!(err, Error::NoFileSpecified));
    }

    #[test]
    fn test_missing_script() {
        let temp = TempDir::new().unwrap();
        let root = root_of(&temp);
        fs::create_dir(root.as_path().join("a")).unwrap();

        let err = resolve(&root, &IgnoreMatcher::empty(), &words(&["a", "nope"])).unwrap_err();
        assert!(matches!(err, Error::NoExecutableFound { .. }));
    }

    #[test]
    fn test_only_owner_executable_counts() {
        let temp = TempDir::new().unwrap();
        let root = root_of(&temp);
        write_script(&root, "group-only", 0o654);

        let err = resolve(&root, &IgnoreMatcher::empty(), &words(&["group-only"])).unwrap_err();
        assert!(matches!(err, Error::NoExecutableFound { .. }));
    }

    #[test]
    fn test_non_executable_file_stops_search() {
        let temp = TempDir::new().unwrap();
        let root = root_of(&temp);
        write_script(&root, "notes", 0o644);

        let err = resolve(&root, &IgnoreMatcher::empty(), &words(&["notes", "x"])).unwrap_err();
        assert!(matches!(err, Error::NoExecutableFound { .. }));
    }

    #[test]
    fn test_ignored_script_is_not_selected() {
        let temp = TempDir::new().unwrap();
        let root = root_of(&temp);
        write_script(&root, "lib/helper", 0o755);
        let ignore = IgnoreMatcher::from_lines(&root, ["lib/"]).unwrap();

        let err = resolve(&root, &ignore, &words(&["lib", "helper"])).unwrap_err();
        assert!(matches!(err, Error::NoExecutableFound { .. }));
    }

    #[test]
    fn test_parent_segments_cannot_escape_root() {
        let outer = TempDir::new().unwrap();
        let outer_root = root_of(&outer);
        write_script(&outer_root, "escape", 0o755);
        fs::create_dir(outer_root.as_path().join("root")).unwrap();
        let root = outer_root.join_segment("root");

        let err = resolve(&root, &IgnoreMatcher::empty(), &words(&["..", "escape"])).unwrap_err();
        assert!(matches!(err, Error::NoExecutableFound { .. }));

        let absolute = outer_root.as_path().join("escape");
        let err = resolve(
            &root,
            &IgnoreMatcher::empty(),
            &words(&[absolute.to_str().unwrap()]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NoExecutableFound { .. }));
    }

    #[test]
    fn test_script_at_root_level() {
        let temp = TempDir::new().unwrap();
        let root = root_of(&temp);
        write_script(&root, "hello", 0o700);

        let resolved = resolve(&root, &IgnoreMatcher::empty(), &words(&["hello"])).unwrap();
        assert!(resolved.args.is_empty());
    }
}
