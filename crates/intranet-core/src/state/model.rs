//! Application state domain models.
//!
//! Contains the data every intranet panel is rendered from. The serialized
//! form of [`ApplicationState`] is the persisted blob and the export format.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IntranetError;

/// Channel that always exists when everything else has been dissolved.
pub const DEFAULT_CHANNEL_ID: &str = "alpha";

/// Threat rating of an intel card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for ThreatLevel {
    type Err = IntranetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(IntranetError::validation(format!("unknown threat level '{}'", other))),
        }
    }
}

/// A dossier entry searchable by the Oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelCard {
    pub name: String,
    pub location: String,
    pub notes: String,
    #[serde(default)]
    pub threat: ThreatLevel,
}

/// A filed field report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    pub body: String,
    pub author: String,
    /// Display timestamp (`YYYY-MM-DD HH:MM`, UTC)
    pub filed_at: String,
}

/// Field status of an agent on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Active,
    Dark,
    Compromised,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Dark => "dark",
            Self::Compromised => "compromised",
        }
    }
}

impl FromStr for AgentStatus {
    type Err = IntranetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "dark" => Ok(Self::Dark),
            "compromised" => Ok(Self::Compromised),
            other => Err(IntranetError::validation(format!("unknown agent status '{}'", other))),
        }
    }
}

/// An agent on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub codename: String,
    pub role: String,
    #[serde(default)]
    pub status: AgentStatus,
}

/// A single chat message. Append-only within its channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub sender: String,
    pub text: String,
    /// Display timestamp (`HH:MM`, UTC)
    pub timestamp: String,
}

/// A chat channel with its members and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Agent allowed to dissolve the channel.
    #[serde(default)]
    pub commander: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            commander: None,
            members: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Adds `member` unless already present. Returns whether it was added.
    pub fn add_member(&mut self, member: &str) -> bool {
        if self.members.iter().any(|m| m == member) {
            return false;
        }
        self.members.push(member.to_string());
        true
    }
}

/// Everything persisted under the application-data key.
///
/// # Invariants
///
/// * `active_channel_id` references an entry of `channels` once
///   [`ApplicationState::normalize`] has run. Every constructor and every
///   transition keeps it that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    #[serde(default)]
    pub intel_cards: Vec<IntelCard>,
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default)]
    pub agents: Vec<Agent>,
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub active_channel_id: String,
}

impl ApplicationState {
    /// The documented seed data used when nothing (valid) is persisted.
    pub fn seed() -> Self {
        let mut alpha = Channel::new(DEFAULT_CHANNEL_ID, "Alpha Cell");
        alpha.commander = Some("CHIEF-01".to_string());
        alpha.members = vec![
            "CHIEF-01".to_string(),
            "VIPER-07".to_string(),
            "ORCA-12".to_string(),
        ];

        let mut bravo = Channel::new("bravo", "Bravo Relay");
        bravo.commander = Some("VIPER-07".to_string());
        bravo.members = vec!["VIPER-07".to_string(), "LYNX-03".to_string()];

        Self {
            intel_cards: vec![
                IntelCard {
                    name: "Nightjar".to_string(),
                    location: "Lisbon".to_string(),
                    notes: "Courier network operating out of the harbour district.".to_string(),
                    threat: ThreatLevel::Medium,
                },
                IntelCard {
                    name: "Obsidian Ledger".to_string(),
                    location: "Zurich".to_string(),
                    notes: "Shell accounts tied to arms brokers.".to_string(),
                    threat: ThreatLevel::High,
                },
                IntelCard {
                    name: "Paper Lantern".to_string(),
                    location: "Osaka".to_string(),
                    notes: "Dormant asset, last contact three weeks ago.".to_string(),
                    threat: ThreatLevel::Low,
                },
            ],
            reports: vec![Report {
                title: "Harbour surveillance".to_string(),
                body: "Two unmarked vessels docked after midnight.".to_string(),
                author: "ORCA-12".to_string(),
                filed_at: "2024-03-02 23:40".to_string(),
            }],
            agents: vec![
                Agent {
                    codename: "CHIEF-01".to_string(),
                    role: "Station chief".to_string(),
                    status: AgentStatus::Active,
                },
                Agent {
                    codename: "VIPER-07".to_string(),
                    role: "Field operative".to_string(),
                    status: AgentStatus::Active,
                },
                Agent {
                    codename: "ORCA-12".to_string(),
                    role: "Signals analyst".to_string(),
                    status: AgentStatus::Dark,
                },
            ],
            channels: vec![alpha, bravo],
            active_channel_id: DEFAULT_CHANNEL_ID.to_string(),
        }
    }

    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn channel_mut(&mut self, id: &str) -> Option<&mut Channel> {
        self.channels.iter_mut().find(|c| c.id == id)
    }

    /// The channel `active_channel_id` points at.
    pub fn active_channel(&self) -> Option<&Channel> {
        self.channel(&self.active_channel_id)
    }

    /// Restores the active-channel invariant.
    ///
    /// A dangling `active_channel_id` falls back to the first channel; with
    /// no channels left an empty default channel is created. Returns whether
    /// anything changed.
    pub fn normalize(&mut self) -> bool {
        if self.channel(&self.active_channel_id).is_some() {
            return false;
        }
        if self.channels.is_empty() {
            self.channels
                .push(Channel::new(DEFAULT_CHANNEL_ID, "Alpha Cell"));
        }
        self.active_channel_id = self.channels[0].id.clone();
        true
    }
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::seed()
    }
}
