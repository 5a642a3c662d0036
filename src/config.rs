//! Configuration types for Folio.
//!
//! This module provides the [`Config`] struct which stores the settings the
//! core consults, most importantly the allow-list of recognized document
//! extensions. Configuration is persisted as TOML (typically at
//! `~/.config/folio/config.toml` on Unix systems) and is loaded once at
//! startup through the same [`FileSystem`] abstraction the rest of the
//! crate uses.

use std::path::Path;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use crate::error::FolioError;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::naming::ExtensionPolicy;

/// The document extensions recognized when no config overrides them.
pub const DEFAULT_ALLOWED_FILETYPES: &[&str] = &[".md", ".markdown", ".txt", ".rmd"];

/// `Config` is a data structure that represents the parts of Folio that the
/// user can configure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Extensions treated as native document types. Names ending in one of
    /// these keep their extension; everything else gets `.md` appended.
    #[serde(default = "default_allowed_filetypes")]
    pub allowed_filetypes: Vec<String>,
}

fn default_allowed_filetypes() -> Vec<String> {
    DEFAULT_ALLOWED_FILETYPES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_filetypes: default_allowed_filetypes(),
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize this config to TOML text.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a config from `path`, falling back to defaults if the file
    /// doesn't exist.
    pub fn load_from<FS: FileSystem>(fs: &FS, path: &Path) -> Result<Self> {
        if !fs.exists(path) {
            return Ok(Self::default());
        }
        let text = fs.read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Save this config to `path`, creating parent directories as needed.
    pub fn save_to<FS: FileSystem>(&self, fs: &FS, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs.create_dir_all(parent)?;
        }
        fs.write_file(path, &self.to_toml()?)?;
        Ok(())
    }

    /// Default config file location (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(FolioError::NoConfigDir)?;
        Ok(config_dir.join("folio").join("config.toml"))
    }

    /// Build the extension policy this config describes.
    pub fn extension_policy(&self) -> ExtensionPolicy {
        ExtensionPolicy::new(self.allowed_filetypes.iter())
    }
}
