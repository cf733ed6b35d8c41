//! Transfer verification.
//!
//! Verification establishes that the destination is a faithful superset of
//! the source: every file under the source must exist at the same relative
//! path under the destination with the same size. This is a size-based
//! comparison, tolerant of metadata and timestamp noise while still
//! catching truncated or substituted files. Extra destination-only files
//! never fail verification; the destination may hold prior transfers.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::fs_ops;

/// Maximum number of differences carried in a failed report.
pub const DIFF_LIMIT: usize = 20;

/// One source entry the destination does not faithfully hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffEntry {
    /// No entry at this relative path under the destination
    Missing { relative_path: PathBuf },
    /// Entry exists but with a different size
    SizeMismatch {
        relative_path: PathBuf,
        source_size: u64,
        dest_size: u64,
    },
}

/// Result of verifying one source/destination pair.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    /// True if every source entry is faithfully present at the destination
    pub passed: bool,

    /// Reason for an early failure (missing directory, enumeration error)
    pub reason: Option<String>,

    /// Differences found, capped at DIFF_LIMIT entries
    pub differences: Vec<DiffEntry>,

    /// True if more differences exist than the report carries
    pub truncated: bool,
}

impl VerifyReport {
    fn passed() -> Self {
        VerifyReport {
            passed: true,
            reason: None,
            differences: Vec::new(),
            truncated: false,
        }
    }

    fn failed_with_reason(reason: String) -> Self {
        VerifyReport {
            passed: false,
            reason: Some(reason),
            differences: Vec::new(),
            truncated: false,
        }
    }

    /// Render the failure for operator diagnostics, one difference per line.
    pub fn describe(&self) -> String {
        if let Some(reason) = &self.reason {
            return reason.clone();
        }

        let count = if self.truncated {
            format!("more than {}", self.differences.len())
        } else {
            self.differences.len().to_string()
        };
        let mut text = format!("{} entry(s) missing or mismatched at destination", count);
        for diff in &self.differences {
            match diff {
                DiffEntry::Missing { relative_path } => {
                    let _ = write!(text, "\n  missing: {}", relative_path.display());
                }
                DiffEntry::SizeMismatch {
                    relative_path,
                    source_size,
                    dest_size,
                } => {
                    let _ = write!(
                        text,
                        "\n  size differs: {} (source {} bytes, destination {} bytes)",
                        relative_path.display(),
                        source_size,
                        dest_size
                    );
                }
            }
        }
        if self.truncated {
            text.push_str("\n  (list truncated)");
        }
        text
    }
}

/// Verify that `dest` faithfully holds everything under `source`.
///
/// Both directories must exist; either missing fails immediately with a
/// "directory missing" reason. Transient OS bookkeeping artifacts are
/// excluded from the comparison on both sides.
pub fn verify_transfer(source: &Path, dest: &Path) -> VerifyReport {
    if !fs_ops::dir_exists(source) {
        return VerifyReport::failed_with_reason(format!(
            "source directory missing: {}",
            source.display()
        ));
    }
    if !fs_ops::dir_exists(dest) {
        return VerifyReport::failed_with_reason(format!(
            "destination directory missing: {}",
            dest.display()
        ));
    }

    let source_index = match index_tree(source) {
        Ok(index) => index,
        Err(e) => return VerifyReport::failed_with_reason(e.to_string()),
    };
    let dest_index = match index_tree(dest) {
        Ok(index) => index,
        Err(e) => return VerifyReport::failed_with_reason(e.to_string()),
    };

    let mut differences = Vec::new();
    let mut truncated = false;
    for (relative_path, source_size) in &source_index {
        let diff = match dest_index.get(relative_path) {
            Some(dest_size) if dest_size == source_size => continue,
            Some(dest_size) => DiffEntry::SizeMismatch {
                relative_path: relative_path.clone(),
                source_size: *source_size,
                dest_size: *dest_size,
            },
            None => DiffEntry::Missing {
                relative_path: relative_path.clone(),
            },
        };
        if differences.len() < DIFF_LIMIT {
            differences.push(diff);
        } else {
            truncated = true;
            break;
        }
    }

    if differences.is_empty() {
        VerifyReport::passed()
    } else {
        VerifyReport {
            passed: false,
            reason: None,
            differences,
            truncated,
        }
    }
}

/// Collect (relative_path, size) for every file under `root`, recursively.
///
/// Excluded artifacts are skipped; an excluded directory name prunes its
/// whole subtree. The map is ordered so reports list paths deterministically.
fn index_tree(root: &Path) -> Result<BTreeMap<PathBuf, u64>, EngineError> {
    let mut index = BTreeMap::new();

    fn recurse(
        path: &Path,
        relative: &Path,
        index: &mut BTreeMap<PathBuf, u64>,
    ) -> Result<(), EngineError> {
        let entries = fs::read_dir(path).map_err(|e| EngineError::EnumerationFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| EngineError::EnumerationFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
            let name = entry.file_name();
            if fs_ops::is_excluded_artifact(&name) {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| EngineError::EnumerationFailed {
                path: entry.path(),
                source: e,
            })?;
            let entry_relative = relative.join(&name);

            if metadata.is_dir() {
                recurse(&entry.path(), &entry_relative, index)?;
            } else {
                index.insert(entry_relative, metadata.len());
            }
        }
        Ok(())
    }

    recurse(root, Path::new(""), &mut index)?;
    Ok(index)
}
