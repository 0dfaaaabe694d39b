//! Wiring for one browser origin and the tabs opened on it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use intranet_core::Result;
use intranet_core::clock::{Clock, SystemClock};
use intranet_core::config::RootConfig;
use intranet_core::session::SessionGuard;
use intranet_core::storage::{KeyValueStore, StorageKeys};
use intranet_core::sync::{ChangeNotifier, TabId};
use intranet_core::view::ViewSink;
use intranet_infrastructure::{
    BroadcastNotifier, FileStore, MemoryStore, ObservedStore, StateRepositoryImpl,
};
use tracing::info;

use crate::controller::IntranetController;
use crate::synchronizer::CrossTabSynchronizer;

/// The shared side of every tab: one key-value store, one change bus.
#[derive(Clone)]
pub struct Origin {
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<BroadcastNotifier>,
    clock: Arc<dyn Clock>,
    config: RootConfig,
}

impl Origin {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, config: RootConfig) -> Self {
        Self {
            store,
            notifier: Arc::new(BroadcastNotifier::new()),
            clock,
            config,
        }
    }

    /// An origin backed by nothing but memory.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(Arc::new(MemoryStore::new()), clock, RootConfig::default())
    }

    /// An origin persisted to `path`, on the system clock.
    pub fn on_disk(path: PathBuf, config: RootConfig) -> Self {
        info!("[Bootstrap] Origin store at {}", path.display());
        Self::new(Arc::new(FileStore::new(path)), Arc::new(SystemClock), config)
    }

    pub fn keys(&self) -> StorageKeys {
        self.config.keys()
    }

    pub fn config(&self) -> &RootConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    pub fn notifier(&self) -> Arc<BroadcastNotifier> {
        self.notifier.clone()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.session.tick_interval_ms)
    }

    /// Opens a new tab and loads it.
    ///
    /// The synchronizer subscribes before the tab reads anything, so no write
    /// made by another tab after this call is missed.
    pub async fn open_tab<S: ViewSink>(
        &self,
        views: S,
    ) -> Result<(IntranetController<S>, CrossTabSynchronizer)> {
        let tab = TabId::new();
        let keys = self.keys();
        let notifier: Arc<dyn ChangeNotifier> = self.notifier.clone();

        let synchronizer = CrossTabSynchronizer::new(notifier.as_ref(), tab.clone(), keys.clone());

        let store: Arc<dyn KeyValueStore> =
            Arc::new(ObservedStore::new(self.store.clone(), notifier, tab.clone()));
        let guard = SessionGuard::new(store.clone(), keys.clone(), self.clock.clone())
            .with_duration_secs(self.config.session.duration_secs);
        let repository = Arc::new(StateRepositoryImpl::new(store, keys));

        let mut controller =
            IntranetController::new(tab.clone(), guard, repository, self.clock.clone(), views)
                .with_export_format(self.config.export.format);
        controller.load().await?;

        info!("[Bootstrap] Tab {} opened", tab);
        Ok((controller, synchronizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intranet_core::clock::ManualClock;
    use intranet_core::view::MemoryViewSink;

    #[tokio::test]
    async fn test_open_tab_renders_every_panel() {
        let origin = Origin::in_memory(Arc::new(ManualClock::new(0)));
        let (tab, _sync) = origin.open_tab(MemoryViewSink::new()).await.unwrap();

        assert!(tab.views().markup(intranet_core::view::Panel::Agents).contains("CHIEF-01"));
        assert_eq!(origin.notifier().subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_tabs_get_distinct_ids() {
        let origin = Origin::in_memory(Arc::new(ManualClock::new(0)));
        let (a, _) = origin.open_tab(MemoryViewSink::new()).await.unwrap();
        let (b, _) = origin.open_tab(MemoryViewSink::new()).await.unwrap();
        assert_ne!(a.tab(), b.tab());
    }

    #[test]
    fn test_tick_interval_from_config() {
        let mut config = RootConfig::default();
        config.session.tick_interval_ms = 250;
        let origin = Origin::new(
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::new(0)),
            config,
        );
        assert_eq!(origin.tick_interval(), Duration::from_millis(250));
    }
}
