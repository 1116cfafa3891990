//! Replace the target config in one step.
//!
//! The new contents are staged in a temporary file beside the target and then
//! renamed over it, so the config on disk is always either the old or the new
//! version. The staged file is removed if anything fails before the rename.
use std::io::Write as _;
use std::path::Path;

use crate::error::ConfigError;

/// Atomically replace `path` with `contents`, keeping the original file's
/// permissions when it exists.
///
/// # Errors
///
/// Returns an error if the staging file cannot be created or written, or if
/// it cannot be renamed over `path`.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staged = tempfile::Builder::new()
        .prefix(".aqua-sync-")
        .suffix(".toml.tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    staged.write_all(contents.as_bytes()).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;

    if let Ok(metadata) = std::fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_err)?;
    }

    staged.persist(path).map_err(|e| ConfigError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
