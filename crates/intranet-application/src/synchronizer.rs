//! Cross-tab synchronizer.
//!
//! Turns storage-change notifications published by other tabs into
//! [`SyncAction`]s and applies them to the local controller. There is no
//! conflict resolution: the last write to a key wins.

use intranet_core::Result;
use intranet_core::storage::StorageKeys;
use intranet_core::sync::{ChangeNotifier, StorageEvent, SyncAction, TabId, route};
use intranet_core::view::ViewSink;
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::warn;

use crate::controller::IntranetController;

/// Everything a tab redoes when it may have missed events.
const RESYNC: [SyncAction; 3] = [
    SyncAction::RefreshTimer,
    SyncAction::ReloadState,
    SyncAction::ReloadNotes,
];

pub struct CrossTabSynchronizer {
    tab: TabId,
    keys: StorageKeys,
    receiver: Receiver<StorageEvent>,
}

impl CrossTabSynchronizer {
    /// Subscribes immediately; events published before this call are not seen.
    pub fn new(notifier: &dyn ChangeNotifier, tab: TabId, keys: StorageKeys) -> Self {
        Self {
            tab,
            keys,
            receiver: notifier.subscribe(),
        }
    }

    pub fn tab(&self) -> &TabId {
        &self.tab
    }

    /// Drains pending events without waiting.
    ///
    /// Actions are deduplicated, keeping first-seen order.
    pub fn poll(&mut self) -> Vec<SyncAction> {
        let mut actions = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if let Some(action) = route(&event, &self.tab, &self.keys) {
                        push_unique(&mut actions, action);
                    }
                }
                Err(TryRecvError::Lagged(missed)) => {
                    warn!(tab = %self.tab, missed, "[Sync] Lagged behind, resyncing");
                    for action in RESYNC {
                        push_unique(&mut actions, action);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        actions
    }

    /// Waits for the next action. `None` once the notifier is gone.
    pub async fn next_action(&mut self) -> Option<Vec<SyncAction>> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if let Some(action) = route(&event, &self.tab, &self.keys) {
                        return Some(vec![action]);
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(tab = %self.tab, missed, "[Sync] Lagged behind, resyncing");
                    return Some(RESYNC.to_vec());
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Applies every pending action to `controller`. Returns how many ran.
    pub async fn pump<S: ViewSink>(
        &mut self,
        controller: &mut IntranetController<S>,
    ) -> Result<usize> {
        let actions = self.poll();
        for action in &actions {
            controller.apply_sync(*action).await?;
        }
        Ok(actions.len())
    }
}

fn push_unique(actions: &mut Vec<SyncAction>, action: SyncAction) {
    if !actions.contains(&action) {
        actions.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intranet_infrastructure::BroadcastNotifier;

    fn event(key: &str, origin: &TabId) -> StorageEvent {
        StorageEvent {
            key: key.to_string(),
            new_value: None,
            origin: origin.clone(),
        }
    }

    #[test]
    fn test_poll_dedupes_and_skips_own_events() {
        let notifier = BroadcastNotifier::new();
        let me = TabId::new();
        let other = TabId::new();
        let mut sync = CrossTabSynchronizer::new(&notifier, me.clone(), StorageKeys::default());

        notifier.publish(event("intranet.state", &me));
        notifier.publish(event("intranet.state", &other));
        notifier.publish(event("intranet.agent", &other));
        notifier.publish(event("intranet.state", &other));

        assert_eq!(
            sync.poll(),
            vec![SyncAction::ReloadState, SyncAction::RefreshTimer]
        );
        assert!(sync.poll().is_empty());
    }

    #[test]
    fn test_lag_triggers_full_resync() {
        let notifier = BroadcastNotifier::with_capacity(2);
        let me = TabId::new();
        let other = TabId::new();
        let mut sync = CrossTabSynchronizer::new(&notifier, me, StorageKeys::default());

        for _ in 0..5 {
            notifier.publish(event("intranet.notes", &other));
        }

        let actions = sync.poll();
        for action in RESYNC {
            assert!(actions.contains(&action));
        }
    }

    #[tokio::test]
    async fn test_next_action_waits_for_foreign_event() {
        let notifier = BroadcastNotifier::new();
        let me = TabId::new();
        let other = TabId::new();
        let mut sync = CrossTabSynchronizer::new(&notifier, me.clone(), StorageKeys::default());

        notifier.publish(event("intranet.notes", &me));
        notifier.publish(event("intranet.notes", &other));

        assert_eq!(sync.next_action().await, Some(vec![SyncAction::ReloadNotes]));
    }
}
