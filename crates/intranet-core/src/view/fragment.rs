use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A region of the intranet screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Session,
    Intel,
    Chat,
    Reports,
    Agents,
    Channels,
    Notes,
}

impl Panel {
    /// Panels projected from the application-state blob.
    pub const DATA: [Panel; 5] = [
        Panel::Intel,
        Panel::Chat,
        Panel::Reports,
        Panel::Agents,
        Panel::Channels,
    ];

    pub const ALL: [Panel; 7] = [
        Panel::Session,
        Panel::Intel,
        Panel::Chat,
        Panel::Reports,
        Panel::Agents,
        Panel::Channels,
        Panel::Notes,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Panel::Session => "session",
            Panel::Intel => "intel",
            Panel::Chat => "chat",
            Panel::Reports => "reports",
            Panel::Agents => "agents",
            Panel::Channels => "channels",
            Panel::Notes => "notes",
        }
    }

    pub fn parse(id: &str) -> Option<Panel> {
        Panel::ALL.into_iter().find(|p| p.id() == id)
    }
}

/// Rebuilt content of one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFragment {
    pub panel: Panel,
    pub markup: String,
}

/// Where rendered fragments go; the stand-in for the page DOM.
///
/// Mounting a fragment replaces whatever the panel showed before.
pub trait ViewSink: Send + Sync {
    fn mount(&mut self, fragment: ViewFragment);
}

/// Keeps the latest fragment of every panel in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryViewSink {
    fragments: BTreeMap<Panel, ViewFragment>,
    mounts: usize,
}

impl MemoryViewSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, panel: Panel) -> Option<&ViewFragment> {
        self.fragments.get(&panel)
    }

    pub fn markup(&self, panel: Panel) -> &str {
        self.get(panel).map(|f| f.markup.as_str()).unwrap_or("")
    }

    /// Number of mounts since creation.
    pub fn mount_count(&self) -> usize {
        self.mounts
    }
}

impl ViewSink for MemoryViewSink {
    fn mount(&mut self, fragment: ViewFragment) {
        self.mounts += 1;
        self.fragments.insert(fragment.panel, fragment);
    }
}
