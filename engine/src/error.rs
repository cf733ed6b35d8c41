//! Error types for the transfer engine.
//!
//! The primary error type is `EngineError`, which represents run-level
//! errors that abort an invocation before any job is touched. Job-level
//! failures (a failed copy or verification) are recorded in JobOutcome,
//! not as EngineError: one failing job must never stop the batch.

use std::error::Error;
use std::fmt::{self, Display};
use std::io;
use std::path::PathBuf;

/// Errors that abort the run before or during job resolution.
#[derive(Debug)]
pub enum EngineError {
    /// Configuration file does not exist
    ConfigMissing { path: PathBuf },

    /// Configuration file exists but could not be read
    ConfigRead { path: PathBuf, source: io::Error },

    /// Configuration file content could not be parsed
    ConfigParse { path: PathBuf, message: String },

    /// Resolution produced no jobs; an empty transfer set is never
    /// silently successful
    EmptyJobSet,

    /// Failed to enumerate a directory during verification
    EnumerationFailed { path: PathBuf, source: io::Error },

    /// Failed to create a destination parent directory
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    /// Failed to delete a source directory during cleanup
    RemovalFailed { path: PathBuf, source: io::Error },
}

impl Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigMissing { path } => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            Self::ConfigRead { path, source } => {
                write!(
                    f,
                    "Failed to read configuration file {}: {}",
                    path.display(),
                    source
                )
            }
            Self::ConfigParse { path, message } => {
                write!(
                    f,
                    "Failed to parse configuration file {}: {}",
                    path.display(),
                    message
                )
            }
            Self::EmptyJobSet => {
                write!(f, "Configuration resolved to no transfer jobs")
            }
            Self::EnumerationFailed { path, source } => {
                write!(f, "Failed to enumerate directory {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(f, "Failed to create directory {}: {}", path.display(), source)
            }
            Self::RemovalFailed { path, source } => {
                write!(f, "Failed to delete directory {}: {}", path.display(), source)
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ConfigRead { source, .. }
            | Self::EnumerationFailed { source, .. }
            | Self::DirectoryCreationFailed { source, .. }
            | Self::RemovalFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
