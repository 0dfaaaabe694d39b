//! Session domain model.

use serde::{Deserialize, Serialize};

/// Default lifetime of a session: 10 minutes.
pub const DEFAULT_SESSION_DURATION_SECS: u64 = 10 * 60;

/// Longest session a deployment may configure: one day.
pub const MAX_SESSION_DURATION_SECS: u64 = 24 * 60 * 60;

/// The authenticated identity and the moment its lock engages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub agent_identifier: String,
    /// Unix timestamp in milliseconds
    pub expiry_timestamp: i64,
}

impl Session {
    /// Whole seconds left before expiry, rounded up. Zero or negative once expired.
    pub fn remaining_secs(&self, now_millis: i64) -> i64 {
        let left = self.expiry_timestamp - now_millis;
        if left <= 0 { 0 } else { (left + 999) / 1000 }
    }

    pub fn is_expired(&self, now_millis: i64) -> bool {
        self.expiry_timestamp <= now_millis
    }
}

/// Which screen the session allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No valid session: the login view.
    Locked,
    /// Logged in, protocols not yet accepted.
    AwaitingProtocols,
    Dashboard,
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Active { remaining_secs: i64 },
    /// The session ran out on this tick and has been cleared.
    Expired,
    Locked,
}

/// Formats seconds as `MM:SS`.
pub fn format_remaining(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_rounds_up() {
        let session = Session {
            agent_identifier: "CHIEF-01".to_string(),
            expiry_timestamp: 10_500,
        };
        assert_eq!(session.remaining_secs(10_000), 1);
        assert_eq!(session.remaining_secs(0), 11);
        assert_eq!(session.remaining_secs(10_500), 0);
        assert!(session.is_expired(10_500));
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(600), "10:00");
        assert_eq!(format_remaining(61), "01:01");
        assert_eq!(format_remaining(-4), "00:00");
    }
}
