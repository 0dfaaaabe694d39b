//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` (by default
//! `~/.config/intranet/config.toml`).

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use intranet_core::config::RootConfig;
use intranet_core::{IntranetError, Result};
use tracing::{info, warn};

use crate::paths::IntranetPaths;

/// Loads and caches the root configuration.
///
/// A missing file is created with the defaults. A file that fails to parse
/// or validate is reported as a `Config` error and nothing is cached.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Uses the platform config file.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(IntranetPaths::config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|e| IntranetError::internal(format!("config lock poisoned: {}", e)))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|e| IntranetError::internal(format!("config lock poisoned: {}", e)))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_config(&self) -> Result<RootConfig> {
        if !self.path.exists() {
            let default_config = RootConfig::default();
            if let Err(e) = self.write_default(&default_config) {
                warn!(path = %self.path.display(), error = %e, "Could not write default config");
            } else {
                info!(path = %self.path.display(), "Created default config");
            }
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(&self.path)?;
        RootConfig::from_toml_str(&content).map_err(|e| {
            IntranetError::config(format!("{}: {}", self.path.display(), e))
        })
    }

    fn write_default(&self, config: &RootConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, config.to_toml_string()?)?;
        Ok(())
    }
}
