use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for folio operations
#[derive(Debug, Error)]
pub enum FolioError {
    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to remove file '{path}': {source}")]
    FileRemove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to scan directory '{path}': {source}")]
    DirScan {
        path: PathBuf,
        source: std::io::Error,
    },

    // Workflow errors
    #[error("Could not create new file '{0}': no directory selected")]
    NoTargetDirectory(String),

    #[error("Could not create file: filename '{0}' is not valid")]
    InvalidName(String),

    #[error("Not a file in the index: '{0}'")]
    NotInIndex(PathBuf),

    // Dispatch boundary errors
    #[error("Invalid request payload: {0}")]
    InvalidRequest(String),

    // Config errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Result type alias for folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// A serializable representation of FolioError for the response surface
/// (IPC, WASM bridges, logs).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableError {
    /// Error kind/variant name
    pub kind: String,
    /// Human-readable error message
    pub message: String,
    /// Associated path (if applicable)
    pub path: Option<PathBuf>,
}

impl From<&FolioError> for SerializableError {
    fn from(err: &FolioError) -> Self {
        let kind = match err {
            FolioError::Io(_) => "Io",
            FolioError::FileCreate { .. } => "FileCreate",
            FolioError::FileRemove { .. } => "FileRemove",
            FolioError::DirScan { .. } => "DirScan",
            FolioError::NoTargetDirectory(_) => "NoTargetDirectory",
            FolioError::InvalidName(_) => "InvalidName",
            FolioError::NotInIndex(_) => "NotInIndex",
            FolioError::InvalidRequest(_) => "InvalidRequest",
            FolioError::ConfigParse(_) => "ConfigParse",
            FolioError::ConfigSerialize(_) => "ConfigSerialize",
            FolioError::NoConfigDir => "NoConfigDir",
        }
        .to_string();

        let path = match err {
            FolioError::FileCreate { path, .. } => Some(path.clone()),
            FolioError::FileRemove { path, .. } => Some(path.clone()),
            FolioError::DirScan { path, .. } => Some(path.clone()),
            FolioError::NotInIndex(path) => Some(path.clone()),
            _ => None,
        };

        Self {
            kind,
            message: err.to_string(),
            path,
        }
    }
}

impl From<FolioError> for SerializableError {
    fn from(err: FolioError) -> Self {
        SerializableError::from(&err)
    }
}

impl FolioError {
    /// Convert to a serializable representation for the response surface
    pub fn to_serializable(&self) -> SerializableError {
        SerializableError::from(self)
    }
}
