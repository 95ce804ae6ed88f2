//! A runnable script under the root

use crate::completion::COMPLETION_MARKER;
use crate::usage::UsageInfo;
use std::fs;
use tome_core::path::{AbsPath, RelPath};
use tome_core::{Error, Result};

/// A script file, anchored under the root it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRef {
    path: AbsPath,
    relative: RelPath,
    usage: UsageInfo,
}

impl ScriptRef {
    /// Load a script and its usage header
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not under `root` or the file cannot be read.
    pub fn load(root: &AbsPath, path: AbsPath) -> Result<Self> {
        let relative = path.strip_prefix(root)?;
        let usage = UsageInfo::from_file(path.as_path())?;
        Ok(Self {
            path,
            relative,
            usage,
        })
    }

    /// Absolute path of the script
    pub fn path(&self) -> &AbsPath {
        &self.path
    }

    /// Path relative to the root
    pub fn relative(&self) -> &RelPath {
        &self.relative
    }

    /// The words a user types to reach this script, e.g. `["db", "backup"]`
    pub fn segments(&self) -> Vec<String> {
        self.relative.segments()
    }

    /// Segments joined with spaces, as shown in listings
    pub fn command_line(&self) -> String {
        self.segments().join(" ")
    }

    /// One-line usage (may be empty)
    pub fn usage(&self) -> &str {
        &self.usage.usage
    }

    /// Full help block (may be empty)
    pub fn help(&self) -> &str {
        &self.usage.help
    }

    /// Whether the owner-executable bit is set
    pub fn is_executable(&self) -> bool {
        fs::metadata(self.path.as_path())
            .is_ok_and(|metadata| metadata.is_file() && tome_core::is_executable_by_owner(&metadata))
    }

    /// Whether the script opts into delegated completion
    ///
    /// A script opts in by mentioning the completion marker anywhere in its text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScriptRead`] if the file cannot be read.
    pub fn has_completions(&self) -> Result<bool> {
        let content = fs::read(self.path.as_path()).map_err(|source| Error::ScriptRead {
            path: self.path.as_path().to_path_buf(),
            source,
        })?;
        let marker = COMPLETION_MARKER.as_bytes();
        Ok(content.windows(marker.len()).any(|window| window == marker))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    fn root_of(temp: &TempDir) -> AbsPath {
        AbsPath::new(fs::canonicalize(temp.path()).unwrap()).unwrap()
    }

    #[test]
    fn test_load_nested_script() {
        let temp = TempDir::new().unwrap();
        let root = root_of(&temp);
        fs::create_dir(root.as_path().join("db")).unwrap();
        fs::write(
            root.as_path().join("db/backup"),
            "#!/bin/sh\n# USAGE: $0 <name>\n# Dumps a database.\n",
        )
        .unwrap();

        let script = ScriptRef::load(&root, root.join_segment("db").join_segment("backup")).unwrap();

        assert_eq!(script.segments(), vec!["db", "backup"]);
        assert_eq!(script.command_line(), "db backup");
        assert_eq!(script.usage(), "<name>");
        assert!(script.help().contains("Dumps a database."));
    }

    #[test]
    fn test_load_outside_root() {
        let temp = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let root = root_of(&temp);
        let outside = root_of(&other).join_segment("x");
        fs::write(outside.as_path(), "#!/bin/sh\n").unwrap();

        let err = ScriptRef::load(&root, outside).unwrap_err();
        assert!(matches!(err, Error::InvalidPathPrefix { .. }));
    }

    #[test]
    fn test_has_completions() {
        let temp = TempDir::new().unwrap();
        let root = root_of(&temp);
        fs::write(
            root.as_path().join("with"),
            "#!/bin/sh\nif [ -n \"$TOME_COMPLETION\" ]; then echo a; fi\n",
        )
        .unwrap();
        fs::write(root.as_path().join("without"), "#!/bin/sh\necho hi\n").unwrap();

        let with = ScriptRef::load(&root, root.join_segment("with")).unwrap();
        let without = ScriptRef::load(&root, root.join_segment("without")).unwrap();

        assert!(with.has_completions().unwrap());
        assert!(!without.has_completions().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let root = root_of(&temp);
        let path = root.as_path().join("run");
        fs::write(&path, "#!/bin/sh\n").unwrap();

        let script = ScriptRef::load(&root, root.join_segment("run")).unwrap();
        assert!(!script.is_executable());

        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(script.is_executable());
    }
}
