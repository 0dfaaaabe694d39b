//! Origin-scoped key-value storage interface.
//!
//! Everything the intranet persists lives under a handful of string keys in
//! one store shared by every tab of the same origin. Backends live in
//! `intranet-infrastructure`.

use async_trait::async_trait;

use crate::error::Result;

/// String-valued key-value store scoped to one origin.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// The persistence keys used by one intranet deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub agent: String,
    pub lock_expiry: String,
    pub protocols_accepted: String,
    pub state: String,
    pub notes: String,
}

/// Kind of data a persistence key carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Identifier, expiry or protocol flag.
    Session,
    /// Full application-state blob.
    State,
    /// Free-text personal notes.
    Notes,
}

pub const DEFAULT_KEY_PREFIX: &str = "intranet";

impl StorageKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            agent: format!("{prefix}.agent"),
            lock_expiry: format!("{prefix}.lockExpiry"),
            protocols_accepted: format!("{prefix}.protocolsAccepted"),
            state: format!("{prefix}.state"),
            notes: format!("{prefix}.notes"),
        }
    }

    /// Classifies `key`, or `None` when it belongs to someone else.
    pub fn classify(&self, key: &str) -> Option<KeyKind> {
        if key == self.agent || key == self.lock_expiry || key == self.protocols_accepted {
            Some(KeyKind::Session)
        } else if key == self.state {
            Some(KeyKind::State)
        } else if key == self.notes {
            Some(KeyKind::Notes)
        } else {
            None
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys_use_prefix() {
        let keys = StorageKeys::default();
        assert_eq!(keys.state, "intranet.state");
        assert_eq!(keys.lock_expiry, "intranet.lockExpiry");
    }

    #[test]
    fn test_classify() {
        let keys = StorageKeys::with_prefix("hq");
        assert_eq!(keys.classify("hq.agent"), Some(KeyKind::Session));
        assert_eq!(keys.classify("hq.protocolsAccepted"), Some(KeyKind::Session));
        assert_eq!(keys.classify("hq.state"), Some(KeyKind::State));
        assert_eq!(keys.classify("hq.notes"), Some(KeyKind::Notes));
        assert_eq!(keys.classify("intranet.state"), None);
    }
}
