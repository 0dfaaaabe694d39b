//! Unified path management for intranet configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/intranet/          # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/intranet/     # Data directory
//! └── storage.json             # Origin key-value store (FileStore)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "intranet";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for intranet_core::IntranetError {
    fn from(err: PathError) -> Self {
        intranet_core::IntranetError::config(err.to_string())
    }
}

/// Resolves platform directories for the intranet.
pub struct IntranetPaths;

impl IntranetPaths {
    /// Returns the configuration directory (e.g. `~/.config/intranet/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g. `~/.local/share/intranet/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default backing file of the origin store.
    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage.json"))
    }
}
