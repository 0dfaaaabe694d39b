use std::sync::Arc;

use async_trait::async_trait;
use intranet_core::Result;
use intranet_core::storage::KeyValueStore;
use intranet_core::sync::{ChangeNotifier, StorageEvent, TabId};

/// One tab's handle on a shared origin store.
///
/// Reads pass straight through. Every successful write is announced on the
/// notifier with this tab as the origin, which is how the other tabs learn
/// about it.
#[derive(Clone)]
pub struct ObservedStore {
    inner: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn ChangeNotifier>,
    tab: TabId,
}

impl ObservedStore {
    pub fn new(
        inner: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn ChangeNotifier>,
        tab: TabId,
    ) -> Self {
        Self {
            inner,
            notifier,
            tab,
        }
    }

    pub fn tab(&self) -> &TabId {
        &self.tab
    }

    fn announce(&self, key: &str, new_value: Option<&str>) {
        self.notifier.publish(StorageEvent {
            key: key.to_string(),
            new_value: new_value.map(str::to_string),
            origin: self.tab.clone(),
        });
    }
}

#[async_trait]
impl KeyValueStore for ObservedStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set(key, value).await?;
        self.announce(key, Some(value));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await?;
        self.announce(key, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::BroadcastNotifier;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_writes_are_announced_with_origin() {
        let shared: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let notifier = Arc::new(BroadcastNotifier::new());
        let mut rx = notifier.subscribe();

        let tab = TabId::new();
        let store = ObservedStore::new(shared.clone(), notifier.clone(), tab.clone());
        store.set("intranet.notes", "hello").await.unwrap();
        store.remove("intranet.notes").await.unwrap();

        let set = rx.recv().await.unwrap();
        assert_eq!(set.origin, tab);
        assert_eq!(set.new_value.as_deref(), Some("hello"));
        let removed = rx.recv().await.unwrap();
        assert_eq!(removed.new_value, None);
        assert!(shared.get("intranet.notes").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reads_are_silent() {
        let shared: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let notifier = Arc::new(BroadcastNotifier::new());
        let mut rx = notifier.subscribe();
        let store = ObservedStore::new(shared, notifier.clone(), TabId::new());

        store.get("intranet.state").await.unwrap();
        assert!(rx.try_recv().is_err());
    }
}
