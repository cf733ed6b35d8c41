//! Declarative transfer configuration.
//!
//! A configuration document names zero or more explicit source/destination
//! pairs and zero or more transfer groups. The primary format is YAML;
//! a secondary tabular format (two comma-separated columns with a header
//! row) is compiled into the same document shape before resolution, so the
//! rest of the engine only ever sees the declarative form.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::EngineError;

/// An explicit source -> destination pair as written in configuration.
///
/// Either field may be absent; such a pair contributes no job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferPair {
    #[serde(default)]
    pub source: Option<PathBuf>,

    #[serde(default)]
    pub destination: Option<PathBuf>,
}

/// A group of sources sharing one destination base.
///
/// With `preserve_source_name` (the default) each source lands in its own
/// child directory under the base; without it all sources merge into the
/// base itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferGroup {
    #[serde(default)]
    pub destination_base: Option<PathBuf>,

    #[serde(default = "default_preserve_source_name")]
    pub preserve_source_name: bool,

    #[serde(default)]
    pub sources: Vec<PathBuf>,
}

fn default_preserve_source_name() -> bool {
    true
}

/// A parsed configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Explicit pairs, resolved before any group
    #[serde(default)]
    pub transfers: Vec<TransferPair>,

    /// Groups, resolved after all explicit pairs
    #[serde(default)]
    pub transfer_groups: Vec<TransferGroup>,
}

impl Document {
    /// Load a configuration document from a file.
    ///
    /// Files with a `.csv` extension go through the tabular builder; every
    /// other file is parsed as YAML.
    ///
    /// # Errors
    /// Returns EngineError if the file is missing, unreadable, or malformed.
    pub fn load(path: &Path) -> Result<Document, EngineError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(EngineError::ConfigMissing {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => {
                return Err(EngineError::ConfigRead {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let is_tabular = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

        if is_tabular {
            Document::from_table(path, &content)
        } else {
            Document::from_yaml(path, &content)
        }
    }

    /// Parse a YAML document.
    pub fn from_yaml(path: &Path, content: &str) -> Result<Document, EngineError> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Compile tabular input into the declarative form.
    ///
    /// Two comma-separated columns (source, destination). The first
    /// non-ignored row is the mandatory header and is discarded. Rows
    /// starting with `#` and blank rows are ignored. A row missing a column
    /// compiles to a pair with that field absent, which resolves to no job.
    pub fn from_table(path: &Path, content: &str) -> Result<Document, EngineError> {
        let mut rows = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        if rows.next().is_none() {
            return Err(EngineError::ConfigParse {
                path: path.to_path_buf(),
                message: "tabular input has no header row".to_string(),
            });
        }

        let transfers = rows
            .map(|row| {
                let mut columns = row.splitn(2, ',').map(str::trim);
                TransferPair {
                    source: columns.next().filter(|c| !c.is_empty()).map(PathBuf::from),
                    destination: columns.next().filter(|c| !c.is_empty()).map(PathBuf::from),
                }
            })
            .collect();

        Ok(Document {
            transfers,
            transfer_groups: Vec::new(),
        })
    }
}
