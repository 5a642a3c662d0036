#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command surface (typed dispatch boundary)
pub mod command;

/// Configuration options
pub mod config;

/// Name-conflict resolution and overwrite confirmation
pub mod conflict;

/// Document manager (open and unsaved documents)
pub mod documents;

/// Error (common error types)
pub mod error;

/// Filesystem abstraction
pub mod fs;

/// In-memory file index
pub mod index;

/// Filename sanitization and extension policy
pub mod naming;

/// User-facing prompts
pub mod prompt;

/// File-creation workflow orchestration
pub mod workflow;

pub use command::{Command, Response};
pub use error::{FolioError, Result};
pub use workflow::Folio;
