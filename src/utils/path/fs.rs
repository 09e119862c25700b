//! Filesystem path helpers.
//!
//! - `ensure_dir` - create a destination directory tree
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `expand_path` - tilde expansion relative to a base directory

use crate::error::{FontFaceError, Result};
use std::path::{Path, PathBuf};

/// Create `dir` and all missing parents. Existing directories are fine.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|err| FontFaceError::fs("create directory", dir, err))
}

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Expand `~` and resolve a relative path against `base`.
///
/// Used for tool paths in `fontface.toml`, which are written relative to
/// the config file rather than the working directory.
pub fn expand_path(path: &Path, base: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    if path.is_relative() {
        base.join(path)
    } else {
        path
    }
}
