use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{IntranetError, Result};
use crate::session::{DEFAULT_SESSION_DURATION_SECS, MAX_SESSION_DURATION_SECS};
use crate::state::ExportFormat;
use crate::storage::{DEFAULT_KEY_PREFIX, StorageKeys};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RootConfig {
    pub session: SessionConfig,
    pub storage: StorageConfig,
    pub export: ExportConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Session lifetime after login
    pub duration_secs: u64,
    /// Countdown tick period
    pub tick_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_SESSION_DURATION_SECS,
            tick_interval_ms: 1000,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub key_prefix: String,
    /// Backing file of the origin store. Defaults to the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            data_file: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
}

impl RootConfig {
    /// Parses and validates a TOML document. Missing fields take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RootConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.session.duration_secs == 0 {
            return Err(IntranetError::config("session.duration_secs must be positive"));
        }
        if self.session.duration_secs > MAX_SESSION_DURATION_SECS {
            return Err(IntranetError::config(format!(
                "session.duration_secs must be at most {}",
                MAX_SESSION_DURATION_SECS
            )));
        }
        if self.session.tick_interval_ms == 0 {
            return Err(IntranetError::config("session.tick_interval_ms must be positive"));
        }
        if self.storage.key_prefix.trim().is_empty() {
            return Err(IntranetError::config("storage.key_prefix must not be empty"));
        }
        Ok(())
    }

    pub fn keys(&self) -> StorageKeys {
        StorageKeys::with_prefix(self.storage.key_prefix.trim())
    }
}
