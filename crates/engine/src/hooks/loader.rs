//! Hook discovery
//!
//! Scans `<root>/.hooks.d/` (flat, not recursive) and returns hooks sorted by
//! file name.

use super::config::{Hook, HookKind};
use std::fs;
use std::path::{Path, PathBuf};
use tome_core::{Error, Result};

/// Name of the hooks directory under the root
pub const HOOKS_DIR_NAME: &str = ".hooks.d";

/// File name suffix marking a hook as sourced
pub const SOURCED_SUFFIX: &str = ".source";

/// Discover hooks from the hooks directory
pub struct HookLoader {
    hooks_dir: PathBuf,
}

impl HookLoader {
    /// Create a new hook loader for the given root directory
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            hooks_dir: root.join(HOOKS_DIR_NAME),
        }
    }

    /// The directory this loader scans
    #[must_use]
    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    /// Check if hooks directory exists
    #[must_use]
    pub fn exists(&self) -> bool {
        self.hooks_dir.is_dir()
    }

    /// Load all hooks, sorted by file name
    ///
    /// - A missing hooks directory yields no hooks
    /// - Subdirectories are skipped
    /// - `*.source` files are always eligible; readability is checked when
    ///   the wrapper sources them
    /// - Other files must be owner-executable, or they are skipped with a warning
    ///
    /// # Errors
    ///
    /// Returns [`Error::HookDiscovery`] if the directory exists but cannot be read.
    pub fn load(&self) -> Result<Vec<Hook>> {
        let discovery_error = |source| Error::HookDiscovery {
            path: self.hooks_dir.clone(),
            source,
        };

        match fs::metadata(&self.hooks_dir) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "Hooks directory does not exist: {}",
                    self.hooks_dir.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(discovery_error(e)),
            Ok(_) => {}
        }

        let mut hooks = Vec::new();
        for entry in fs::read_dir(&self.hooks_dir).map_err(discovery_error)? {
            let entry = entry.map_err(discovery_error)?;
            if let Some(hook) = Self::classify(&entry.path()) {
                tracing::debug!(hook = %hook.name, kind = %hook.kind, "discovered hook");
                hooks.push(hook);
            }
        }

        // Byte order of the names is the execution order
        hooks.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(count = hooks.len(), "discovered hooks");

        Ok(hooks)
    }

    fn classify(path: &Path) -> Option<Hook> {
        let name = path.file_name()?.to_string_lossy().into_owned();

        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("Failed to stat hook {}: {e}", path.display());
                return None;
            }
        };

        if metadata.is_dir() {
            return None;
        }

        let kind = if name.ends_with(SOURCED_SUFFIX) {
            HookKind::Sourced
        } else if tome_core::is_executable_by_owner(&metadata) {
            HookKind::Executed
        } else {
            tracing::warn!(
                "Skipping non-executable hook without {SOURCED_SUFFIX} suffix: {}",
                path.display()
            );
            return None;
        };

        Some(Hook {
            name,
            path: path.to_path_buf(),
            kind,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn create_hooks_dir(root: &Path) -> PathBuf {
        let hooks_dir = root.join(HOOKS_DIR_NAME);
        fs::create_dir_all(&hooks_dir).unwrap();
        hooks_dir
    }

    fn write_hook(dir: &Path, name: &str, mode: u32) {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\ntrue\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_hook_loader_new() {
        let temp = TempDir::new().unwrap();
        let loader = HookLoader::new(temp.path());

        assert_eq!(loader.hooks_dir(), temp.path().join(".hooks.d"));
    }

    #[test]
    fn test_exists() {
        let temp = TempDir::new().unwrap();
        let loader = HookLoader::new(temp.path());
        assert!(!loader.exists());

        create_hooks_dir(temp.path());
        assert!(loader.exists());
    }

    #[test]
    fn test_load_no_hooks_directory() {
        let temp = TempDir::new().unwrap();
        let hooks = HookLoader::new(temp.path()).load().unwrap();

        assert!(hooks.is_empty());
    }

    #[test]
    fn test_load_sorted_and_classified() {
        let temp = TempDir::new().unwrap();
        let dir = create_hooks_dir(temp.path());
        write_hook(&dir, "10-check", 0o755);
        write_hook(&dir, "05-env.source", 0o644);
        write_hook(&dir, "00-first", 0o700);

        let hooks = HookLoader::new(temp.path()).load().unwrap();
        let names: Vec<_> = hooks.iter().map(|h| h.name.as_str()).collect();

        assert_eq!(names, vec!["00-first", "05-env.source", "10-check"]);
        assert_eq!(hooks[0].kind, HookKind::Executed);
        assert_eq!(hooks[1].kind, HookKind::Sourced);
        assert_eq!(hooks[2].path, dir.join("10-check"));
    }

    #[test]
    fn test_byte_order_not_numeric() {
        let temp = TempDir::new().unwrap();
        let dir = create_hooks_dir(temp.path());
        write_hook(&dir, "10-b", 0o755);
        write_hook(&dir, "9-a", 0o755);
        write_hook(&dir, "B-upper", 0o755);

        let hooks = HookLoader::new(temp.path()).load().unwrap();
        let names: Vec<_> = hooks.iter().map(|h| h.name.as_str()).collect();

        assert_eq!(names, vec!["10-b", "9-a", "B-upper"]);
    }

    #[test]
    fn test_non_executable_is_skipped() {
        let temp = TempDir::new().unwrap();
        let dir = create_hooks_dir(temp.path());
        write_hook(&dir, "10-plain", 0o644);
        write_hook(&dir, "20-group-only", 0o610);

        let hooks = HookLoader::new(temp.path()).load().unwrap();
        assert!(hooks.is_empty());
    }

    #[test]
    fn test_subdirectories_are_skipped() {
        let temp = TempDir::new().unwrap();
        let dir = create_hooks_dir(temp.path());
        fs::create_dir(dir.join("nested.source")).unwrap();
        write_hook(&dir.join("nested.source"), "inner", 0o755);

        let hooks = HookLoader::new(temp.path()).load().unwrap();
        assert!(hooks.is_empty());
    }

    #[test]
    fn test_hooks_dir_is_a_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(HOOKS_DIR_NAME), "not a dir").unwrap();

        let err = HookLoader::new(temp.path()).load().unwrap_err();
        assert!(matches!(err, Error::HookDiscovery { .. }));
    }
}
