//! Persistence adapter for the application-state blob and personal notes.

use std::sync::Arc;

use async_trait::async_trait;
use intranet_core::Result;
use intranet_core::state::{ApplicationState, StateRepository};
use intranet_core::storage::{KeyValueStore, StorageKeys};
use tracing::{debug, warn};

/// Stores the whole [`ApplicationState`] as JSON under the state key.
///
/// The adapter holds no copy of the state; the controller owns the in-memory
/// store and calls [`StateRepository::save_state`] after every mutation.
#[derive(Clone)]
pub struct StateRepositoryImpl {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl StateRepositoryImpl {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }
}

#[async_trait]
impl StateRepository for StateRepositoryImpl {
    async fn load_state(&self) -> Result<ApplicationState> {
        let Some(raw) = self.store.get(&self.keys.state).await? else {
            debug!("No persisted state, using seed data");
            return Ok(ApplicationState::seed());
        };

        match serde_json::from_str::<ApplicationState>(&raw) {
            Ok(mut state) => {
                if state.normalize() {
                    warn!(
                        "Persisted active channel was dangling, fell back to {}",
                        state.active_channel_id
                    );
                }
                Ok(state)
            }
            Err(e) => {
                warn!(error = %e, "Persisted state is corrupt, falling back to seed data");
                Ok(ApplicationState::seed())
            }
        }
    }

    async fn save_state(&self, state: &ApplicationState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.store.set(&self.keys.state, &json).await?;
        debug!(bytes = json.len(), "Saved application state");
        Ok(())
    }

    async fn load_notes(&self) -> Result<String> {
        Ok(self.store.get(&self.keys.notes).await?.unwrap_or_default())
    }

    async fn save_notes(&self, notes: &str) -> Result<()> {
        self.store.set(&self.keys.notes, notes).await
    }
}
