//! Cross-tab change notifications.
//!
//! Tabs of the same origin share one store. Each write is announced as a
//! [`StorageEvent`]; [`route`] decides what a receiving tab has to redo.

mod event;

pub use event::{ChangeNotifier, StorageEvent, TabId};

use crate::storage::{KeyKind, StorageKeys};

/// Work a tab must do after another tab's write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Session markers changed: re-run the timer display.
    RefreshTimer,
    /// The state blob changed: reload it and re-render every data panel.
    ReloadState,
    /// Notes changed: re-render the notes panel.
    ReloadNotes,
}

/// Maps `event` to the action `own_tab` must take, if any.
///
/// Events caused by the tab itself and events for foreign keys are ignored.
pub fn route(event: &StorageEvent, own_tab: &TabId, keys: &StorageKeys) -> Option<SyncAction> {
    if &event.origin == own_tab {
        return None;
    }
    match keys.classify(&event.key)? {
        KeyKind::Session => Some(SyncAction::RefreshTimer),
        KeyKind::State => Some(SyncAction::ReloadState),
        KeyKind::Notes => Some(SyncAction::ReloadNotes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(key: &str, origin: &TabId) -> StorageEvent {
        StorageEvent {
            key: key.to_string(),
            new_value: Some("x".to_string()),
            origin: origin.clone(),
        }
    }

    #[test]
    fn test_own_writes_are_ignored() {
        let keys = StorageKeys::default();
        let me = TabId::new();
        assert_eq!(route(&event("intranet.state", &me), &me, &keys), None);
    }

    #[test]
    fn test_routes_by_key() {
        let keys = StorageKeys::default();
        let me = TabId::new();
        let other = TabId::new();
        assert_eq!(
            route(&event("intranet.state", &other), &me, &keys),
            Some(SyncAction::ReloadState)
        );
        assert_eq!(
            route(&event("intranet.lockExpiry", &other), &me, &keys),
            Some(SyncAction::RefreshTimer)
        );
        assert_eq!(
            route(&event("intranet.notes", &other), &me, &keys),
            Some(SyncAction::ReloadNotes)
        );
        assert_eq!(route(&event("theme", &other), &me, &keys), None);
    }
}
