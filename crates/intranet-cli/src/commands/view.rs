use anyhow::{Result, anyhow};
use intranet_core::view::Panel;

use super::Context;

pub fn render(ctx: &Context, panel: Option<&str>) -> Result<()> {
    let panels = match panel {
        Some(id) => vec![Panel::parse(id).ok_or_else(|| {
            let known: Vec<&str> = Panel::ALL.iter().map(Panel::id).collect();
            anyhow!("Unknown panel '{}' (expected one of: {})", id, known.join(", "))
        })?],
        None => Panel::ALL.to_vec(),
    };

    let views = ctx.tab.views();
    for panel in panels {
        println!("{}", views.markup(panel));
    }
    Ok(())
}
