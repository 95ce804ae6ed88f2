//! Enumerate every runnable script under the root

use crate::script::ScriptRef;
use tome_config::IgnoreMatcher;
use tome_core::path::AbsPath;
use tome_core::Result;
use walkdir::{DirEntry, WalkDir};

/// Collect every owner-executable script under `root`, sorted by path
///
/// Hidden entries (including `.hooks.d` and `.tomeignore`) and ignored paths
/// are skipped, along with everything beneath them. Scripts whose header
/// cannot be read are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the root itself cannot be walked.
pub fn list_scripts(root: &AbsPath, ignore: &IgnoreMatcher) -> Result<Vec<ScriptRef>> {
    let walker = WalkDir::new(root.as_path())
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden_or_ignored(entry, ignore));

    let mut scripts = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("cannot walk root directory"))
                    .into());
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !tome_core::is_executable_by_owner(&metadata) {
            continue;
        }

        let path = AbsPath::new(entry.into_path())?;
        match ScriptRef::load(root, path) {
            Ok(script) => scripts.push(script),
            Err(e) => tracing::warn!("Skipping script: {e}"),
        }
    }

    tracing::debug!(count = scripts.len(), "listed scripts");
    Ok(scripts)
}

fn is_hidden_or_ignored(entry: &DirEntry, ignore: &IgnoreMatcher) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
        || ignore.is_ignored(entry.path(), entry.file_type().is_dir())
}
