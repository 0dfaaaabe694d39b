//! State repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::model::ApplicationState;

/// Repository for the persisted application-state blob and personal notes.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Loads the application state.
    ///
    /// Absent or unreadable blobs yield the seed state rather than an error;
    /// only storage access failures are reported.
    async fn load_state(&self) -> Result<ApplicationState>;

    /// Overwrites the persisted blob with `state` in a single key write.
    async fn save_state(&self, state: &ApplicationState) -> Result<()>;

    async fn load_notes(&self) -> Result<String>;

    async fn save_notes(&self, notes: &str) -> Result<()>;
}
