pub mod archive;
pub mod board;
pub mod landing;
pub mod session;
pub mod view;

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use intranet_application::{IntranetController, Origin};
use intranet_core::session::SessionPhase;
use intranet_infrastructure::{ConfigService, IntranetPaths};
use tracing::debug;

use crate::sink::ConsoleSink;

/// One CLI invocation: a single tab on the file-backed origin.
pub struct Context {
    pub origin: Origin,
    pub tab: IntranetController<ConsoleSink>,
}

impl Context {
    pub async fn open(
        config: Option<PathBuf>,
        data_file: Option<PathBuf>,
        views: ConsoleSink,
    ) -> Result<Self> {
        let service = match config {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new()?,
        };
        let config = service
            .get_config()
            .with_context(|| format!("Failed to load {}", service.path().display()))?;

        let storage = match data_file.or_else(|| config.storage.data_file.clone()) {
            Some(path) => path,
            None => IntranetPaths::storage_file()?,
        };
        debug!(config = %service.path().display(), storage = %storage.display(), "Opening origin");

        let origin = Origin::on_disk(storage, config);
        let (mut tab, _sync) = origin.open_tab(views).await?;
        // Catch up on a countdown that ran out while nothing was watching.
        tab.tick().await?;
        Ok(Self { origin, tab })
    }

    /// Fails unless the dashboard is unlocked.
    pub async fn require_dashboard(&self) -> Result<()> {
        match self.tab.phase().await? {
            SessionPhase::Dashboard => Ok(()),
            SessionPhase::AwaitingProtocols => {
                bail!("Accept the operating protocols first (intranet accept)")
            }
            SessionPhase::Locked => bail!("Authentication required (intranet login <agent>)"),
        }
    }
}
