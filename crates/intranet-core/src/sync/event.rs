use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Identifies one open tab of an origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(pub String);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A change to one key of the origin store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEvent {
    pub key: String,
    /// `None` when the key was removed
    pub new_value: Option<String>,
    /// Tab whose write produced the event
    pub origin: TabId,
}

/// Publish/subscribe transport for storage-change notifications.
///
/// Every subscriber sees every event, including those published by its own
/// tab; filtering by origin is the receiver's business.
pub trait ChangeNotifier: Send + Sync {
    fn publish(&self, event: StorageEvent);

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent>;
}
