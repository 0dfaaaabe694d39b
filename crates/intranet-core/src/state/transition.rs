//! Pure state transitions.
//!
//! Every form submission of the intranet maps to a [`Command`]. Applying a
//! command mutates the [`ApplicationState`] in place and reports which panels
//! need re-rendering; persistence and rendering are the caller's job.

use super::model::{
    Agent, AgentStatus, ApplicationState, Channel, IntelCard, Message, Report, ThreatLevel,
};
use crate::error::{IntranetError, Result};
use crate::view::Panel;

/// An operator action against the state store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Appends a message to the active channel.
    PostMessage {
        sender: String,
        text: String,
        timestamp: String,
    },
    AddAgent {
        codename: String,
        role: String,
        status: AgentStatus,
    },
    RemoveAgent {
        index: usize,
    },
    AddReport {
        title: String,
        body: String,
        author: String,
        filed_at: String,
    },
    RemoveReport {
        index: usize,
    },
    AddIntelCard {
        name: String,
        location: String,
        notes: String,
        threat: ThreatLevel,
    },
    RemoveIntelCard {
        index: usize,
    },
    /// Creates a channel commanded by `commander` and makes it active.
    CreateChannel {
        id: String,
        name: String,
        commander: String,
        members: Vec<String>,
    },
    JoinChannel {
        id: String,
        member: String,
    },
    SwitchChannel {
        id: String,
    },
    /// Removes a channel. Only its commander may do this.
    DissolveChannel {
        id: String,
        actor: String,
    },
}

/// Outcome of a command: the panels whose content changed.
///
/// An empty transition means the command was ignored (e.g. a blank field).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub changed: Vec<Panel>,
}

impl Transition {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(panels: &[Panel]) -> Self {
        Self {
            changed: panels.to_vec(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl Command {
    /// Applies the command to `state`.
    ///
    /// Errors leave `state` exactly as it was.
    pub fn apply(self, state: &mut ApplicationState) -> Result<Transition> {
        match self {
            Command::PostMessage {
                sender,
                text,
                timestamp,
            } => {
                if blank(&sender) || blank(&text) {
                    return Ok(Transition::none());
                }
                let active = state.active_channel_id.clone();
                let channel = state
                    .channel_mut(&active)
                    .ok_or_else(|| IntranetError::not_found("channel", active.clone()))?;
                channel.messages.push(Message {
                    sender: sender.trim().to_string(),
                    text: text.trim().to_string(),
                    timestamp,
                });
                Ok(Transition::of(&[Panel::Chat]))
            }
            Command::AddAgent {
                codename,
                role,
                status,
            } => {
                if blank(&codename) {
                    return Ok(Transition::none());
                }
                state.agents.push(Agent {
                    codename: codename.trim().to_string(),
                    role: role.trim().to_string(),
                    status,
                });
                Ok(Transition::of(&[Panel::Agents]))
            }
            Command::RemoveAgent { index } => {
                if index >= state.agents.len() {
                    return Ok(Transition::none());
                }
                state.agents.remove(index);
                Ok(Transition::of(&[Panel::Agents]))
            }
            Command::AddReport {
                title,
                body,
                author,
                filed_at,
            } => {
                if blank(&title) || blank(&body) {
                    return Ok(Transition::none());
                }
                state.reports.push(Report {
                    title: title.trim().to_string(),
                    body: body.trim().to_string(),
                    author: author.trim().to_string(),
                    filed_at,
                });
                Ok(Transition::of(&[Panel::Reports]))
            }
            Command::RemoveReport { index } => {
                if index >= state.reports.len() {
                    return Ok(Transition::none());
                }
                state.reports.remove(index);
                Ok(Transition::of(&[Panel::Reports]))
            }
            Command::AddIntelCard {
                name,
                location,
                notes,
                threat,
            } => {
                if blank(&name) {
                    return Ok(Transition::none());
                }
                state.intel_cards.push(IntelCard {
                    name: name.trim().to_string(),
                    location: location.trim().to_string(),
                    notes: notes.trim().to_string(),
                    threat,
                });
                Ok(Transition::of(&[Panel::Intel]))
            }
            Command::RemoveIntelCard { index } => {
                if index >= state.intel_cards.len() {
                    return Ok(Transition::none());
                }
                state.intel_cards.remove(index);
                Ok(Transition::of(&[Panel::Intel]))
            }
            Command::CreateChannel {
                id,
                name,
                commander,
                members,
            } => {
                let id = id.trim().to_string();
                if blank(&id) || blank(&commander) {
                    return Ok(Transition::none());
                }
                if state.channel(&id).is_some() {
                    return Err(IntranetError::validation(format!(
                        "Channel '{}' already exists",
                        id
                    )));
                }
                let name = if blank(&name) { id.clone() } else { name.trim().to_string() };
                let mut channel = Channel::new(id.clone(), name);
                let commander = commander.trim().to_string();
                channel.add_member(&commander);
                for member in members.iter().filter(|m| !blank(m)) {
                    channel.add_member(member.trim());
                }
                channel.commander = Some(commander);
                state.channels.push(channel);
                state.active_channel_id = id;
                Ok(Transition::of(&[Panel::Channels, Panel::Chat]))
            }
            Command::JoinChannel { id, member } => {
                if blank(&member) {
                    return Ok(Transition::none());
                }
                let channel = state
                    .channel_mut(&id)
                    .ok_or_else(|| IntranetError::not_found("channel", id.clone()))?;
                if channel.add_member(member.trim()) {
                    Ok(Transition::of(&[Panel::Channels]))
                } else {
                    Ok(Transition::none())
                }
            }
            Command::SwitchChannel { id } => {
                if state.channel(&id).is_none() {
                    return Err(IntranetError::not_found("channel", id));
                }
                if state.active_channel_id == id {
                    return Ok(Transition::none());
                }
                state.active_channel_id = id;
                Ok(Transition::of(&[Panel::Channels, Panel::Chat]))
            }
            Command::DissolveChannel { id, actor } => {
                let channel = state
                    .channel(&id)
                    .ok_or_else(|| IntranetError::not_found("channel", id.clone()))?;
                if channel.commander.as_deref() != Some(actor.as_str()) {
                    return Err(IntranetError::unauthorized(
                        actor,
                        format!("dissolve channel {}", id),
                    ));
                }
                state.channels.retain(|c| c.id != id);
                state.normalize();
                Ok(Transition::of(&[Panel::Channels, Panel::Chat]))
            }
        }
    }
}
