//! The per-tab controller.
//!
//! One `IntranetController` owns the in-memory state store of one tab. Every
//! operation follows the same order: transition, persist, render.

use std::sync::Arc;

use intranet_core::clock::Clock;
use intranet_core::oracle::{self, OracleAnswer};
use intranet_core::session::{Session, SessionGuard, SessionPhase, TickOutcome};
use intranet_core::state::{
    ApplicationState, Command, ExportArtifact, ExportFormat, StateRepository, Transition,
    export_blob, parse_import,
};
use intranet_core::sync::{SyncAction, TabId};
use intranet_core::view::{
    Panel, SessionView, ViewSink, render_data_panel, render_notes, render_session,
};
use intranet_core::{IntranetError, Result};
use tracing::{debug, info, warn};

pub struct IntranetController<S: ViewSink> {
    tab: TabId,
    guard: SessionGuard,
    repository: Arc<dyn StateRepository>,
    clock: Arc<dyn Clock>,
    state: ApplicationState,
    notes: String,
    views: S,
    export_format: ExportFormat,
}

impl<S: ViewSink> IntranetController<S> {
    /// Creates a controller holding the seed state. Call [`Self::load`]
    /// before use.
    pub fn new(
        tab: TabId,
        guard: SessionGuard,
        repository: Arc<dyn StateRepository>,
        clock: Arc<dyn Clock>,
        views: S,
    ) -> Self {
        Self {
            tab,
            guard,
            repository,
            clock,
            state: ApplicationState::seed(),
            notes: String::new(),
            views,
            export_format: ExportFormat::default(),
        }
    }

    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        self.export_format = format;
        self
    }

    pub fn tab(&self) -> &TabId {
        &self.tab
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn views(&self) -> &S {
        &self.views
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    /// Loads the persisted state and notes, then renders every panel.
    pub async fn load(&mut self) -> Result<()> {
        self.state = self.repository.load_state().await?;
        self.notes = self.repository.load_notes().await?;
        info!(tab = %self.tab, channels = self.state.channels.len(), "[Tab] State loaded");
        self.render_all().await
    }

    // ============================================================================
    // Session
    // ============================================================================

    pub async fn login(&mut self, identifier: &str) -> Result<Session> {
        let session = self.guard.login(identifier).await?;
        self.refresh_timer().await?;
        Ok(session)
    }

    pub async fn accept_protocols(&mut self) -> Result<()> {
        self.guard.accept_protocols().await?;
        self.refresh_timer().await
    }

    /// One countdown step; re-renders the session panel.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let outcome = self.guard.tick().await?;
        if outcome == TickOutcome::Expired {
            info!(tab = %self.tab, "[Tab] Session expired, returning to login");
        }
        self.refresh_timer().await?;
        Ok(outcome)
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.guard.logout().await?;
        self.refresh_timer().await
    }

    pub async fn phase(&self) -> Result<SessionPhase> {
        self.guard.phase().await
    }

    pub async fn session_view(&self) -> Result<SessionView> {
        let phase = self.guard.phase().await?;
        if phase == SessionPhase::Locked {
            return Ok(SessionView::locked());
        }
        let agent = self.guard.current().await?.map(|s| s.agent_identifier);
        Ok(SessionView {
            phase,
            agent,
            remaining_secs: self.guard.remaining_secs().await?,
        })
    }

    /// Re-renders the session panel from the stored markers.
    pub async fn refresh_timer(&mut self) -> Result<()> {
        let view = self.session_view().await?;
        self.views.mount(render_session(&view));
        Ok(())
    }

    /// Identifier of the logged-in agent, required for actions that need an actor.
    async fn acting_agent(&self) -> Result<String> {
        if self.guard.phase().await? == SessionPhase::Locked {
            return Err(IntranetError::validation("Log in first"));
        }
        self.guard
            .current()
            .await?
            .map(|s| s.agent_identifier)
            .ok_or_else(|| IntranetError::validation("Log in first"))
    }

    // ============================================================================
    // State store
    // ============================================================================

    /// Applies `command`, persists, then re-renders the changed panels.
    ///
    /// Ignored commands neither persist nor render. Failed commands and
    /// failed saves leave the store untouched.
    pub async fn dispatch(&mut self, command: Command) -> Result<Transition> {
        debug!(tab = %self.tab, ?command, "[Tab] Dispatch");
        let mut next = self.state.clone();
        let transition = command.apply(&mut next)?;
        if transition.is_noop() {
            return Ok(transition);
        }
        // Memory only moves once storage has the new blob.
        self.repository.save_state(&next).await?;
        self.state = next;
        for panel in &transition.changed {
            self.render_panel(*panel).await?;
        }
        Ok(transition)
    }

    /// Posts `text` to the active channel as the logged-in agent.
    pub async fn post_message(&mut self, text: &str) -> Result<Transition> {
        let sender = self.acting_agent().await?;
        let timestamp = self.clock.now().format("%H:%M").to_string();
        self.dispatch(Command::PostMessage {
            sender,
            text: text.to_string(),
            timestamp,
        })
        .await
    }

    /// Dissolves channel `id` on behalf of the logged-in agent.
    pub async fn dissolve_channel(&mut self, id: &str) -> Result<Transition> {
        let actor = self.acting_agent().await?;
        self.dispatch(Command::DissolveChannel {
            id: id.to_string(),
            actor,
        })
        .await
    }

    /// Files a report authored by the logged-in agent.
    pub async fn file_report(&mut self, title: &str, body: &str) -> Result<Transition> {
        let author = self.acting_agent().await?;
        let filed_at = self.clock.now().format("%Y-%m-%d %H:%M").to_string();
        self.dispatch(Command::AddReport {
            title: title.to_string(),
            body: body.to_string(),
            author,
            filed_at,
        })
        .await
    }

    /// Replaces the whole store with an imported blob.
    ///
    /// Invalid input is reported as `InvalidImport` and the current state,
    /// persisted blob and views stay as they were.
    pub async fn import_blob(&mut self, raw: &str) -> Result<()> {
        let imported = match parse_import(raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(tab = %self.tab, error = %e, "[Tab] Import rejected");
                return Err(e);
            }
        };
        self.repository.save_state(&imported).await?;
        self.state = imported;
        info!(tab = %self.tab, "[Tab] State imported");
        self.render_data().await
    }

    /// Exports in the configured format.
    pub fn export_blob(&self) -> Result<ExportArtifact> {
        self.export_as(self.export_format)
    }

    pub fn export_as(&self, format: ExportFormat) -> Result<ExportArtifact> {
        export_blob(&self.state, format, self.clock.now())
    }

    pub fn oracle(&self, query: &str) -> OracleAnswer {
        oracle::answer(query, &self.state.intel_cards)
    }

    pub async fn save_notes(&mut self, notes: &str) -> Result<()> {
        self.repository.save_notes(notes).await?;
        self.notes = notes.to_string();
        self.views.mount(render_notes(&self.notes));
        Ok(())
    }

    // ============================================================================
    // Cross-tab sync
    // ============================================================================

    /// Reacts to another tab's write.
    pub async fn apply_sync(&mut self, action: SyncAction) -> Result<()> {
        debug!(tab = %self.tab, ?action, "[Tab] Sync");
        match action {
            SyncAction::RefreshTimer => self.refresh_timer().await,
            SyncAction::ReloadState => {
                self.state = self.repository.load_state().await?;
                self.render_data().await
            }
            SyncAction::ReloadNotes => {
                self.notes = self.repository.load_notes().await?;
                self.views.mount(render_notes(&self.notes));
                Ok(())
            }
        }
    }

    // ============================================================================
    // Rendering
    // ============================================================================

    pub async fn render_panel(&mut self, panel: Panel) -> Result<()> {
        match panel {
            Panel::Session => self.refresh_timer().await?,
            Panel::Notes => self.views.mount(render_notes(&self.notes)),
            data => {
                if let Some(fragment) = render_data_panel(data, &self.state) {
                    self.views.mount(fragment);
                }
            }
        }
        Ok(())
    }

    async fn render_data(&mut self) -> Result<()> {
        for panel in Panel::DATA {
            self.render_panel(panel).await?;
        }
        Ok(())
    }

    pub async fn render_all(&mut self) -> Result<()> {
        for panel in Panel::ALL {
            self.render_panel(panel).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intranet_core::clock::ManualClock;
    use intranet_core::storage::StorageKeys;
    use intranet_core::view::MemoryViewSink;
    use intranet_infrastructure::{MemoryStore, StateRepositoryImpl};
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Delegates to a real repository until `full` is set.
    struct DiskFullRepository {
        inner: StateRepositoryImpl,
        full: AtomicBool,
    }

    #[async_trait::async_trait]
    impl StateRepository for DiskFullRepository {
        async fn load_state(&self) -> Result<ApplicationState> {
            self.inner.load_state().await
        }

        async fn save_state(&self, state: &ApplicationState) -> Result<()> {
            if self.full.load(Ordering::SeqCst) {
                return Err(IntranetError::data_access("disk full"));
            }
            self.inner.save_state(state).await
        }

        async fn load_notes(&self) -> Result<String> {
            self.inner.load_notes().await
        }

        async fn save_notes(&self, notes: &str) -> Result<()> {
            if self.full.load(Ordering::SeqCst) {
                return Err(IntranetError::data_access("disk full"));
            }
            self.inner.save_notes(notes).await
        }
    }

    async fn tab_on_full_disk() -> (IntranetController<MemoryViewSink>, Arc<DiskFullRepository>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let repository = Arc::new(DiskFullRepository {
            inner: StateRepositoryImpl::new(store.clone(), StorageKeys::default()),
            full: AtomicBool::new(false),
        });
        let guard = SessionGuard::new(store, StorageKeys::default(), clock.clone());
        let mut tab = IntranetController::new(
            TabId::new(),
            guard,
            repository.clone(),
            clock,
            MemoryViewSink::new(),
        );
        tab.load().await.unwrap();
        repository.full.store(true, Ordering::SeqCst);
        (tab, repository)
    }

    #[tokio::test]
    async fn test_failed_save_keeps_memory_and_storage_in_step() {
        let (mut tab, repository) = tab_on_full_disk().await;
        let agents_markup = tab.views().markup(Panel::Agents).to_string();

        let err = tab.dispatch(Command::RemoveAgent { index: 0 }).await.unwrap_err();

        assert!(matches!(err, IntranetError::DataAccess(_)));
        assert_eq!(tab.state().agents.len(), 3);
        assert_eq!(repository.load_state().await.unwrap().agents.len(), 3);
        assert_eq!(tab.views().markup(Panel::Agents), agents_markup);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_import() {
        let (mut tab, repository) = tab_on_full_disk().await;
        let mut other = ApplicationState::seed();
        other.agents.clear();
        let raw = json_blob(&other);

        assert!(tab.import_blob(&raw).await.is_err());

        assert_eq!(tab.state(), &ApplicationState::seed());
        assert_eq!(repository.load_state().await.unwrap(), ApplicationState::seed());
    }

    #[tokio::test]
    async fn test_failed_notes_save_keeps_previous_notes() {
        let (mut tab, _) = tab_on_full_disk().await;
        assert!(tab.save_notes("pier at dawn").await.is_err());
        assert_eq!(tab.notes(), "");
    }

    fn json_blob(state: &ApplicationState) -> String {
        export_blob(state, ExportFormat::Json, ManualClock::new(0).now())
            .unwrap()
            .contents
    }
}
