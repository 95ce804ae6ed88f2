//! Type-safe path types
//!
//! - [`AbsPath`]: Absolute filesystem paths (the root directory, resolved scripts, hooks)
//! - [`RelPath`]: Paths relative to the root, used to render scripts as command segments
//!
//! # Examples
//!
//! ```
//! use tome_core::path::{AbsPath, RelPath};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = AbsPath::new("/home/user/scripts".into())?;
//! let script = RelPath::new("db/backup".into())?;
//!
//! let full = root.join(&script);
//! assert_eq!(full.as_path().to_str().unwrap(), "/home/user/scripts/db/backup");
//! assert_eq!(script.segments(), vec!["db", "backup"]);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An absolute path on the filesystem
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbsPath(PathBuf);

impl AbsPath {
    /// Create a new `AbsPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    ///
    /// ```
    /// use tome_core::path::AbsPath;
    ///
    /// assert!(AbsPath::new("/srv/scripts".into()).is_ok());
    /// assert!(AbsPath::new("relative/path".into()).is_err());
    /// ```
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_absolute() {
            Ok(AbsPath(path))
        } else {
            Err(Error::PathNotAbsolute { path })
        }
    }

    /// Resolve any path against the current directory, canonicalizing when it exists
    ///
    /// Relative roots such as `.` are the common case on the command line.
    pub fn resolve(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::new(std::fs::canonicalize(path)?);
        }
        if path.is_absolute() {
            return Self::new(path.to_path_buf());
        }
        Self::new(std::env::current_dir()?.join(path))
    }

    /// Get the underlying `Path`
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert to a `PathBuf`
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Join with a relative path to create a new absolute path
    pub fn join(&self, rel: &RelPath) -> Self {
        AbsPath(self.0.join(rel.as_path()))
    }

    /// Join a single raw segment (e.g. one CLI token)
    pub fn join_segment(&self, segment: &str) -> Self {
        AbsPath(self.0.join(segment))
    }

    /// Strip a base directory prefix to get a relative path
    ///
    /// # Errors
    ///
    /// Returns an error if `self` is not under `base`.
    ///
    /// ```
    /// use tome_core::path::AbsPath;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let root = AbsPath::new("/srv/scripts".into())?;
    /// let file = AbsPath::new("/srv/scripts/deploy".into())?;
    /// assert_eq!(file.strip_prefix(&root)?.as_path().to_str().unwrap(), "deploy");
    /// # Ok(())
    /// # }
    /// ```
    pub fn strip_prefix(&self, base: &AbsPath) -> Result<RelPath> {
        self.0
            .strip_prefix(&base.0)
            .map(|p| RelPath(p.to_path_buf()))
            .map_err(|_| Error::InvalidPathPrefix {
                path: Arc::new(self.0.clone()),
                base: Arc::new(base.0.clone()),
            })
    }

    /// Get the file name
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|s| s.to_str())
    }
}

/// A relative path (no leading slash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelPath(PathBuf);

impl RelPath {
    /// Create a new `RelPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is absolute.
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_relative() {
            Ok(RelPath(path))
        } else {
            Err(Error::PathNotRelative { path })
        }
    }

    /// Get the underlying `Path`
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// The path components as the words a user types to reach this script
    pub fn segments(&self) -> Vec<String> {
        self.0
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect()
    }
}

impl std::fmt::Display for AbsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for AbsPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
