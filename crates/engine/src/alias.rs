//! Launcher scripts that pin a tome instance to one name and root
//!
//! An alias lets several script trees coexist on `PATH`, each under its own
//! executable name, and therefore its own `<PREFIX>_*` environment.

use crate::wrapper::{quote, utf8_path};
use std::fs;
use std::path::Path;
use tome_config::{BASE_ENV_PREFIX, Config};
use tome_core::{Error, Result};

/// Permissions of a written alias: runnable by its owner, readable by all
pub const ALIAS_MODE: u32 = 0o744;

/// Render a launcher that runs `program` with the configured root and name
///
/// # Errors
///
/// Returns [`Error::WrapperGeneration`] if the root or `program` is not valid UTF-8.
pub fn render(config: &Config, program: &Path) -> Result<String> {
    let root = quote(utf8_path(config.root().as_path())?);
    let executable = quote(config.executable());
    let program = quote(utf8_path(program)?);

    Ok(format!(
        "#!/bin/sh\n\
         # Generated by `tome-cli alias`\n\
         export {BASE_ENV_PREFIX}_ROOT={root}\n\
         export {BASE_ENV_PREFIX}_EXECUTABLE={executable}\n\
         exec {program} \"$@\"\n"
    ))
}

/// Write a rendered alias to `path` and mark it executable
///
/// # Errors
///
/// Returns [`Error::FileWrite`] if the file cannot be written or its mode set.
pub fn write(path: &Path, text: &str) -> Result<()> {
    let write_error = |source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    fs::write(path, text).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(ALIAS_MODE)).map_err(write_error)?;
    }

    tracing::debug!(path = %path.display(), "wrote alias");
    Ok(())
}
