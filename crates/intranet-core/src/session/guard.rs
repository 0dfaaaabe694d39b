use std::sync::Arc;

use tracing::{info, warn};

use super::model::{DEFAULT_SESSION_DURATION_SECS, Session, SessionPhase, TickOutcome};
use crate::clock::Clock;
use crate::error::{IntranetError, Result};
use crate::storage::{KeyValueStore, StorageKeys};

const ACCEPTED: &str = "true";

/// Owns the session markers in the origin store.
///
/// The guard keeps no session in memory: every call reads the markers, so a
/// login or logout made by another tab is seen on the next call.
#[derive(Clone)]
pub struct SessionGuard {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    clock: Arc<dyn Clock>,
    duration_secs: u64,
}

impl SessionGuard {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            keys,
            clock,
            duration_secs: DEFAULT_SESSION_DURATION_SECS,
        }
    }

    pub fn with_duration_secs(mut self, duration_secs: u64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Reads the stored session.
    ///
    /// A missing identifier, missing expiry, or an expiry that does not parse
    /// as an integer all mean "no session".
    pub async fn current(&self) -> Result<Option<Session>> {
        let Some(agent) = self.store.get(&self.keys.agent).await? else {
            return Ok(None);
        };
        let Some(raw_expiry) = self.store.get(&self.keys.lock_expiry).await? else {
            return Ok(None);
        };
        match raw_expiry.trim().parse::<i64>() {
            Ok(expiry_timestamp) => Ok(Some(Session {
                agent_identifier: agent,
                expiry_timestamp,
            })),
            Err(_) => {
                warn!(value = %raw_expiry, "Ignoring corrupt session expiry");
                Ok(None)
            }
        }
    }

    /// Starts a session for `identifier`.
    pub async fn login(&self, identifier: &str) -> Result<Session> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(IntranetError::validation("Agent identifier is required"));
        }

        let session = Session {
            agent_identifier: identifier.to_string(),
            expiry_timestamp: self.expiry_from(self.clock.now_millis())?,
        };
        self.store.remove(&self.keys.protocols_accepted).await?;
        self.store.set(&self.keys.agent, identifier).await?;
        self.store
            .set(&self.keys.lock_expiry, &session.expiry_timestamp.to_string())
            .await?;

        info!(agent = %identifier, expiry = session.expiry_timestamp, "Session opened");
        Ok(session)
    }

    /// Records protocol acceptance for the live session.
    pub async fn accept_protocols(&self) -> Result<()> {
        match self.live_session().await? {
            Some(session) => {
                self.store.set(&self.keys.protocols_accepted, ACCEPTED).await?;
                info!(agent = %session.agent_identifier, "Protocols accepted");
                Ok(())
            }
            None => Err(IntranetError::validation("No active session")),
        }
    }

    /// One countdown step. Clears the session when it has run out.
    pub async fn tick(&self) -> Result<TickOutcome> {
        let Some(session) = self.current().await? else {
            if self.has_markers().await? {
                // A partially written or corrupt session never unlocks anything.
                self.logout().await?;
            }
            return Ok(TickOutcome::Locked);
        };

        let now = self.clock.now_millis();
        if session.is_expired(now) {
            self.logout().await?;
            info!(agent = %session.agent_identifier, "Session expired");
            return Ok(TickOutcome::Expired);
        }

        Ok(TickOutcome::Active {
            remaining_secs: session.remaining_secs(now),
        })
    }

    /// Clears identifier, expiry and protocol markers unconditionally.
    pub async fn logout(&self) -> Result<()> {
        self.store.remove(&self.keys.agent).await?;
        self.store.remove(&self.keys.lock_expiry).await?;
        self.store.remove(&self.keys.protocols_accepted).await?;
        Ok(())
    }

    pub async fn phase(&self) -> Result<SessionPhase> {
        if self.live_session().await?.is_none() {
            return Ok(SessionPhase::Locked);
        }
        let accepted = self.store.get(&self.keys.protocols_accepted).await?;
        if accepted.as_deref() == Some(ACCEPTED) {
            Ok(SessionPhase::Dashboard)
        } else {
            Ok(SessionPhase::AwaitingProtocols)
        }
    }

    /// Seconds left in the live session, if any.
    pub async fn remaining_secs(&self) -> Result<Option<i64>> {
        let now = self.clock.now_millis();
        Ok(self.live_session().await?.map(|s| s.remaining_secs(now)))
    }

    async fn live_session(&self) -> Result<Option<Session>> {
        let now = self.clock.now_millis();
        Ok(self.current().await?.filter(|s| !s.is_expired(now)))
    }

    fn expiry_from(&self, now_millis: i64) -> Result<i64> {
        i64::try_from(self.duration_secs)
            .ok()
            .and_then(|secs| secs.checked_mul(1000))
            .and_then(|millis| now_millis.checked_add(millis))
            .ok_or_else(|| {
                IntranetError::config(format!(
                    "session duration of {}s is out of range",
                    self.duration_secs
                ))
            })
    }

    async fn has_markers(&self) -> Result<bool> {
        Ok(self.store.get(&self.keys.agent).await?.is_some()
            || self.store.get(&self.keys.lock_expiry).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MapStore {
        values: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStore for MapStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.lock().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.values
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<()> {
            self.values.lock().await.remove(key);
            Ok(())
        }
    }

    fn guard() -> (SessionGuard, Arc<MapStore>, ManualClock) {
        let store = Arc::new(MapStore::default());
        let clock = ManualClock::new(1_000_000);
        let guard = SessionGuard::new(
            store.clone(),
            StorageKeys::default(),
            Arc::new(clock.clone()),
        );
        (guard, store, clock)
    }

    #[tokio::test]
    async fn test_login_rejects_empty_identifier() {
        let (guard, _, _) = guard();
        let err = guard.login("   ").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(guard.phase().await.unwrap(), SessionPhase::Locked);
    }

    #[tokio::test]
    async fn test_login_sets_ten_minute_expiry() {
        let (guard, _, _) = guard();
        let session = guard.login("CHIEF-01").await.unwrap();
        assert_eq!(session.expiry_timestamp, 1_000_000 + 600_000);
        assert_eq!(guard.phase().await.unwrap(), SessionPhase::AwaitingProtocols);
        assert_eq!(guard.remaining_secs().await.unwrap(), Some(600));
    }

    #[tokio::test]
    async fn test_out_of_range_duration_is_a_config_error() {
        let (guard, store, _) = guard();
        for secs in [u64::MAX / 2, u64::MAX] {
            let err = guard
                .clone()
                .with_duration_secs(secs)
                .login("CHIEF-01")
                .await
                .unwrap_err();
            assert!(matches!(err, IntranetError::Config(_)), "{secs}: {err:?}");
        }
        assert!(store.get("intranet.agent").await.unwrap().is_none());
        assert_eq!(guard.phase().await.unwrap(), SessionPhase::Locked);
    }

    #[tokio::test]
    async fn test_accept_protocols_opens_dashboard() {
        let (guard, _, _) = guard();
        guard.login("CHIEF-01").await.unwrap();
        guard.accept_protocols().await.unwrap();
        assert_eq!(guard.phase().await.unwrap(), SessionPhase::Dashboard);
    }

    #[tokio::test]
    async fn test_accept_protocols_requires_session() {
        let (guard, _, _) = guard();
        assert!(guard.accept_protocols().await.is_err());
    }

    #[tokio::test]
    async fn test_tick_counts_down() {
        let (guard, _, clock) = guard();
        guard.login("CHIEF-01").await.unwrap();
        clock.advance_secs(1);
        assert_eq!(
            guard.tick().await.unwrap(),
            TickOutcome::Active { remaining_secs: 599 }
        );
    }

    #[tokio::test]
    async fn test_expiry_reported_exactly_once() {
        let (guard, _, clock) = guard();
        guard.login("CHIEF-01").await.unwrap();
        guard.accept_protocols().await.unwrap();
        clock.advance_secs(600);

        assert_eq!(guard.tick().await.unwrap(), TickOutcome::Expired);
        assert_eq!(guard.tick().await.unwrap(), TickOutcome::Locked);
        clock.advance_secs(5);
        assert_eq!(guard.tick().await.unwrap(), TickOutcome::Locked);
        assert_eq!(guard.phase().await.unwrap(), SessionPhase::Locked);
        assert!(guard.current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fresh_login_after_expiry_starts_at_protocols() {
        let (guard, _, clock) = guard();
        guard.login("CHIEF-01").await.unwrap();
        guard.accept_protocols().await.unwrap();
        clock.advance_secs(601);
        guard.tick().await.unwrap();

        guard.login("CHIEF-01").await.unwrap();
        assert_eq!(guard.phase().await.unwrap(), SessionPhase::AwaitingProtocols);
    }

    #[tokio::test]
    async fn test_corrupt_expiry_is_locked() {
        let (guard, store, _) = guard();
        store.set("intranet.agent", "CHIEF-01").await.unwrap();
        store.set("intranet.lockExpiry", "soon").await.unwrap();

        assert!(guard.current().await.unwrap().is_none());
        assert_eq!(guard.phase().await.unwrap(), SessionPhase::Locked);
        assert_eq!(guard.tick().await.unwrap(), TickOutcome::Locked);
        assert!(store.get("intranet.agent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_markers() {
        let (guard, store, _) = guard();
        guard.login("CHIEF-01").await.unwrap();
        guard.accept_protocols().await.unwrap();
        guard.logout().await.unwrap();

        for key in ["intranet.agent", "intranet.lockExpiry", "intranet.protocolsAccepted"] {
            assert!(store.get(key).await.unwrap().is_none(), "{key} left behind");
        }
    }
}
