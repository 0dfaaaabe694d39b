use std::sync::Arc;

use anyhow::Result;
use intranet_application::spawn_ticker;
use intranet_core::session::{SessionPhase, format_remaining};
use tokio::sync::Mutex;
use tokio::time::interval;

use super::Context;

pub async fn login(ctx: &mut Context, agent: &str) -> Result<()> {
    let session = ctx.tab.login(agent).await?;
    println!(
        "Welcome, {}. Session valid for {}.",
        session.agent_identifier,
        format_remaining(ctx.tab.guard().duration_secs() as i64)
    );
    println!("Accept the operating protocols to continue: intranet accept");
    Ok(())
}

pub async fn accept(ctx: &mut Context) -> Result<()> {
    ctx.tab.accept_protocols().await?;
    println!("Protocols accepted. Dashboard unlocked.");
    Ok(())
}

pub async fn status(ctx: &Context) -> Result<()> {
    let view = ctx.tab.session_view().await?;
    match view.phase {
        SessionPhase::Locked => println!("Locked: authentication required"),
        SessionPhase::AwaitingProtocols => println!(
            "{}: awaiting protocol acceptance ({} left)",
            view.agent.unwrap_or_default(),
            format_remaining(view.remaining_secs.unwrap_or(0))
        ),
        SessionPhase::Dashboard => println!(
            "{}: dashboard ({} left)",
            view.agent.unwrap_or_default(),
            format_remaining(view.remaining_secs.unwrap_or(0))
        ),
    }
    Ok(())
}

pub async fn logout(ctx: &mut Context) -> Result<()> {
    ctx.tab.logout().await?;
    println!("Logged out.");
    Ok(())
}

/// Echoes the session panel every tick until the session ends or Ctrl-C.
pub async fn watch(ctx: Context) -> Result<()> {
    let period = ctx.origin.tick_interval();
    let tab = Arc::new(Mutex::new(ctx.tab));
    let ticker = spawn_ticker(tab.clone(), period);

    let mut check = interval(period);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = check.tick() => {
                if tab.lock().await.phase().await? == SessionPhase::Locked {
                    break;
                }
            }
        }
    }

    ticker.abort();
    Ok(())
}
