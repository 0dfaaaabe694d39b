use std::collections::{BTreeMap, BTreeSet};

use intranet_core::view::{Panel, ViewFragment, ViewSink};

/// Keeps the latest markup per panel and echoes selected panels to stdout
/// whenever their content changes.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    echo: BTreeSet<Panel>,
    latest: BTreeMap<Panel, String>,
}

impl ConsoleSink {
    pub fn quiet() -> Self {
        Self::default()
    }

    pub fn echoing(panels: impl IntoIterator<Item = Panel>) -> Self {
        Self {
            echo: panels.into_iter().collect(),
            latest: BTreeMap::new(),
        }
    }

    pub fn markup(&self, panel: Panel) -> &str {
        self.latest.get(&panel).map(String::as_str).unwrap_or("")
    }
}

impl ViewSink for ConsoleSink {
    fn mount(&mut self, fragment: ViewFragment) {
        let changed = self.latest.get(&fragment.panel) != Some(&fragment.markup);
        if changed && self.echo.contains(&fragment.panel) {
            println!("{}", fragment.markup);
        }
        self.latest.insert(fragment.panel, fragment.markup);
    }
}
