//! Command surface for dispatch mechanisms.
//!
//! Commands are serializable for cross-runtime usage (IPC, WASM bridges,
//! CLI). The payload is strictly typed: malformed input is rejected at this
//! boundary with [`FolioError::InvalidRequest`] and never reaches the
//! workflow.
//!
//! # Usage
//!
//! ```ignore
//! use folio_core::command::{Command, Response};
//!
//! let cmd = Command::from_json(r#"{"type":"CreateFile","params":{"name":"draft"}}"#)?;
//! let response = folio.execute(cmd, &confirm, &prompter).await;
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result, SerializableError};

/// All commands that can be executed against a Folio instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum Command {
    /// Create a new file and activate it.
    CreateFile {
        /// Target directory path. When absent (or not found), falls back
        /// to the currently open directory.
        #[serde(default)]
        path: Option<String>,
        /// Requested file name, before sanitization.
        name: String,
    },

    /// Create a new in-memory document and activate it.
    CreateUnsavedDocument,
}

impl Command {
    /// Parse a command from a JSON payload, rejecting malformed input at
    /// the dispatch boundary.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| FolioError::InvalidRequest(e.to_string()))
    }
}

/// Responses from command execution.
///
/// `execute` never fails outright: errors are reported through the prompt
/// and log collaborators and show up here only as [`Response::Failed`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Response {
    /// A file was created and activated.
    Created {
        /// Path of the new file.
        path: PathBuf,
    },

    /// An unsaved document was created and activated.
    UnsavedCreated {
        /// Identifier of the new document.
        id: u64,
    },

    /// The user declined an overwrite; nothing was mutated. Not an error.
    Aborted,

    /// The operation failed; details were prompted and/or logged.
    Failed(SerializableError),
}
