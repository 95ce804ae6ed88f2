//! Ignore patterns loaded from `.tomeignore`
//!
//! The file lives directly under the root and uses gitignore syntax,
//! including `!` negation. Matching is delegated to ripgrep's `ignore` crate.
//!
//! ```text
//! # .tomeignore
//! *.md
//! lib/
//! !lib/public-tool
//! ```

use crate::Result;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;
use tome_core::path::AbsPath;

/// File name of the ignore file, relative to the root
pub const IGNORE_FILE_NAME: &str = ".tomeignore";

/// Path predicate answering "should this path be hidden from tome?"
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    gitignore: Gitignore,
}

impl IgnoreMatcher {
    /// Load `<root>/.tomeignore`, or an empty matcher if the file is absent
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(root: &AbsPath) -> Result<Self> {
        let ignore_path = root.as_path().join(IGNORE_FILE_NAME);
        let mut builder = GitignoreBuilder::new(root.as_path());

        if ignore_path.is_file() {
            tracing::debug!(path = %ignore_path.display(), "loading ignore file");
            if let Some(e) = builder.add(&ignore_path) {
                return Err(tome_core::Error::Config(format!(
                    "Failed to parse {}: {e}",
                    ignore_path.display()
                )));
            }
        }

        let gitignore = builder.build().map_err(|e| {
            tome_core::Error::Config(format!("Failed to build ignore matcher: {e}"))
        })?;

        Ok(Self { gitignore })
    }

    /// Build a matcher from in-memory gitignore lines
    ///
    /// # Errors
    ///
    /// Returns an error if any line is not a valid gitignore pattern.
    pub fn from_lines<I, S>(root: &AbsPath, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(root.as_path());
        for line in lines {
            builder
                .add_line(None, line.as_ref())
                .map_err(|e| tome_core::Error::Config(format!("Invalid ignore pattern: {e}")))?;
        }
        let gitignore = builder.build().map_err(|e| {
            tome_core::Error::Config(format!("Failed to build ignore matcher: {e}"))
        })?;
        Ok(Self { gitignore })
    }

    /// A matcher that ignores nothing
    pub fn empty() -> Self {
        Self {
            gitignore: Gitignore::empty(),
        }
    }

    /// Check whether a path (absolute, under the root) is ignored
    ///
    /// A path is ignored when it or any of its parent directories matches.
    /// Paths outside the root are never ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if self.gitignore.is_empty() || !path.starts_with(self.gitignore.path()) {
            return false;
        }
        self.gitignore
            .matched_path_or_any_parents(path, is_dir)
            .is_ignore()
    }
}

impl Default for IgnoreMatcher {
    fn default() -> Self {
        Self::empty()
    }
}
