//! In-process change notification bus.

use intranet_core::sync::{ChangeNotifier, StorageEvent};
use tokio::sync::broadcast;
use tracing::trace;

const DEFAULT_CAPACITY: usize = 256;

/// Fans every published [`StorageEvent`] out to all subscribers.
///
/// Subscribers that fall more than `capacity` events behind lose the oldest
/// ones; the synchronizer treats a lag as "reload everything".
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<StorageEvent>,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier for BroadcastNotifier {
    fn publish(&self, event: StorageEvent) {
        trace!(key = %event.key, origin = %event.origin, "Publishing storage event");
        // No subscribers is fine: nobody else has the origin open.
        let _ = self.sender.send(event);
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.sender.subscribe()
    }
}
