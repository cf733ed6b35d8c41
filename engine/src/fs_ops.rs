//! Filesystem helpers shared by the copy, verify, and cleanup phases.
//!
//! This module provides small stateless operations:
//! - Directory existence checks
//! - Basename extraction (trailing separators ignored)
//! - Recursive parent directory creation
//! - Recursive source deletion (cleanup phase)
//! - The shared exclusion list for transient OS bookkeeping artifacts

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::EngineError;

/// File names excluded from both copying and verification.
///
/// These are transient OS bookkeeping artifacts that appear and disappear
/// on their own; comparing them would make verification flaky. A trailing
/// `*` matches any name with the preceding prefix.
pub const EXCLUDED_ARTIFACTS: &[&str] = &[".DS_Store", "._*", "Thumbs.db", "desktop.ini"];

/// Returns true if the given file name is a transient artifact that both
/// the copy and verify phases ignore.
pub fn is_excluded_artifact(name: &OsStr) -> bool {
    let Some(name) = name.to_str() else {
        return false;
    };
    EXCLUDED_ARTIFACTS.iter().any(|pattern| match pattern.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => name == *pattern,
    })
}

/// Returns true if the path exists and is a directory.
pub fn dir_exists(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Extract the final path segment of `path`, ignoring trailing separators.
///
/// Returns None for paths with no final segment (e.g. `/` or `..`).
pub fn basename(path: &Path) -> Option<&OsStr> {
    path.file_name()
}

/// Ensure the parent directory of a path exists, creating it if necessary.
///
/// # Errors
/// Returns EngineError if the parent exists but is not a directory, or if
/// creation fails.
pub fn ensure_parent_dir_exists(path: &Path) -> Result<(), EngineError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    match fs::metadata(parent) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(EngineError::DirectoryCreationFailed {
            path: parent.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "parent path exists but is not a directory",
            ),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(parent).map_err(|e| EngineError::DirectoryCreationFailed {
                path: parent.to_path_buf(),
                source: e,
            })
        }
        Err(e) => Err(EngineError::DirectoryCreationFailed {
            path: parent.to_path_buf(),
            source: e,
        }),
    }
}

/// Recursively delete a directory tree. Irreversible; callers gate this
/// behind re-verification and explicit confirmation.
///
/// # Errors
/// Returns EngineError if any entry could not be removed.
pub fn remove_dir_recursive(path: &Path) -> Result<(), EngineError> {
    fs::remove_dir_all(path).map_err(|e| EngineError::RemovalFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
