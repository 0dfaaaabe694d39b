//! Pure projections of the state store into panel markup.
//!
//! Each renderer rebuilds its panel from scratch, so rendering the same input
//! twice produces the same fragment. List rows carry their index in a
//! `data-remove` attribute for the per-row removal action.

use std::fmt::Write as _;

use super::fragment::{Panel, ViewFragment};
use crate::session::{SessionPhase, format_remaining};
use crate::state::ApplicationState;

/// What the session panel needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub agent: Option<String>,
    pub remaining_secs: Option<i64>,
}

impl SessionView {
    pub fn locked() -> Self {
        Self {
            phase: SessionPhase::Locked,
            agent: None,
            remaining_secs: None,
        }
    }
}

/// Escapes text for inclusion in markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn fragment(panel: Panel, markup: String) -> ViewFragment {
    ViewFragment { panel, markup }
}

pub fn render_intel(state: &ApplicationState) -> ViewFragment {
    let mut html = String::from("<section id=\"intel\">");
    if state.intel_cards.is_empty() {
        html.push_str("<p class=\"empty\">No intel on file.</p>");
    }
    for (index, card) in state.intel_cards.iter().enumerate() {
        let _ = write!(
            html,
            concat!(
                "<article class=\"intel-card threat-{}\" data-remove=\"{}\">",
                "<h3>{}</h3><p class=\"location\">{}</p><p>{}</p></article>",
            ),
            card.threat.as_str(),
            index,
            escape(&card.name),
            escape(&card.location),
            escape(&card.notes),
        );
    }
    html.push_str("</section>");
    fragment(Panel::Intel, html)
}

/// Messages of the active channel in posting order.
pub fn render_chat(state: &ApplicationState) -> ViewFragment {
    let mut html = String::from("<section id=\"chat\">");
    match state.active_channel() {
        Some(channel) => {
            let _ = write!(
                html,
                "<h2 data-channel=\"{}\">{}</h2><ul class=\"messages\">",
                escape(&channel.id),
                escape(&channel.name),
            );
            for message in &channel.messages {
                let _ = write!(
                    html,
                    "<li><span class=\"time\">{}</span> <b>{}</b>: {}</li>",
                    escape(&message.timestamp),
                    escape(&message.sender),
                    escape(&message.text),
                );
            }
            html.push_str("</ul>");
        }
        None => html.push_str("<p class=\"empty\">No channel selected.</p>"),
    }
    html.push_str("</section>");
    fragment(Panel::Chat, html)
}

pub fn render_reports(state: &ApplicationState) -> ViewFragment {
    let mut html = String::from("<section id=\"reports\">");
    if state.reports.is_empty() {
        html.push_str("<p class=\"empty\">No reports filed.</p>");
    }
    for (index, report) in state.reports.iter().enumerate() {
        let _ = write!(
            html,
            concat!(
                "<article class=\"report\" data-remove=\"{}\"><h3>{}</h3>",
                "<p class=\"meta\">{} &middot; {}</p><p>{}</p></article>",
            ),
            index,
            escape(&report.title),
            escape(&report.author),
            escape(&report.filed_at),
            escape(&report.body),
        );
    }
    html.push_str("</section>");
    fragment(Panel::Reports, html)
}

pub fn render_agents(state: &ApplicationState) -> ViewFragment {
    let mut html = String::from("<section id=\"agents\"><table>");
    for (index, agent) in state.agents.iter().enumerate() {
        let _ = write!(
            html,
            "<tr class=\"status-{}\" data-remove=\"{}\"><td>{}</td><td>{}</td><td>{}</td></tr>",
            agent.status.as_str(),
            index,
            escape(&agent.codename),
            escape(&agent.role),
            agent.status.as_str(),
        );
    }
    html.push_str("</table></section>");
    fragment(Panel::Agents, html)
}

pub fn render_channels(state: &ApplicationState) -> ViewFragment {
    let mut html = String::from("<nav id=\"channels\"><ul>");
    for channel in &state.channels {
        let class = if channel.id == state.active_channel_id {
            " class=\"active\""
        } else {
            ""
        };
        let _ = write!(
            html,
            "<li{} data-channel=\"{}\">{} <small>{} members</small></li>",
            class,
            escape(&channel.id),
            escape(&channel.name),
            channel.members.len(),
        );
    }
    html.push_str("</ul></nav>");
    fragment(Panel::Channels, html)
}

pub fn render_notes(notes: &str) -> ViewFragment {
    fragment(
        Panel::Notes,
        format!("<textarea id=\"notes\">{}</textarea>", escape(notes)),
    )
}

pub fn render_session(view: &SessionView) -> ViewFragment {
    let markup = match view.phase {
        SessionPhase::Locked => {
            "<div id=\"session\" class=\"locked\">Authentication required</div>".to_string()
        }
        SessionPhase::AwaitingProtocols => format!(
            concat!(
                "<div id=\"session\" class=\"protocols\">",
                "{}: accept operating protocols to continue</div>",
            ),
            escape(view.agent.as_deref().unwrap_or("")),
        ),
        SessionPhase::Dashboard => format!(
            "<div id=\"session\" class=\"active\">{} <span class=\"timer\">{}</span></div>",
            escape(view.agent.as_deref().unwrap_or("")),
            format_remaining(view.remaining_secs.unwrap_or(0)),
        ),
    };
    fragment(Panel::Session, markup)
}

/// Renders one of the state-derived panels.
///
/// Returns `None` for `Session` and `Notes`, which are not projected from the
/// state blob.
pub fn render_data_panel(panel: Panel, state: &ApplicationState) -> Option<ViewFragment> {
    match panel {
        Panel::Intel => Some(render_intel(state)),
        Panel::Chat => Some(render_chat(state)),
        Panel::Reports => Some(render_reports(state)),
        Panel::Agents => Some(render_agents(state)),
        Panel::Channels => Some(render_channels(state)),
        Panel::Session | Panel::Notes => None,
    }
}
