//! Dashboard commands: chat, channels, roster, reports, intel, Oracle and notes.

use anyhow::Result;
use intranet_core::state::{AgentStatus, Command, ThreatLevel, Transition};

use super::Context;

fn report(transition: &Transition, done: &str) {
    if transition.is_noop() {
        println!("Nothing to do.");
    } else {
        println!("{done}");
    }
}

pub async fn post(ctx: &mut Context, text: &str) -> Result<()> {
    ctx.require_dashboard().await?;
    let transition = ctx.tab.post_message(text).await?;
    report(&transition, "Message sent.");
    Ok(())
}

pub async fn switch(ctx: &mut Context, channel: &str) -> Result<()> {
    ctx.require_dashboard().await?;
    let transition = ctx
        .tab
        .dispatch(Command::SwitchChannel {
            id: channel.to_string(),
        })
        .await?;
    report(&transition, &format!("Now on #{channel}."));
    Ok(())
}

pub async fn create_channel(
    ctx: &mut Context,
    id: &str,
    name: &str,
    members: Vec<String>,
) -> Result<()> {
    ctx.require_dashboard().await?;
    let commander = ctx
        .tab
        .session_view()
        .await?
        .agent
        .unwrap_or_default();
    let transition = ctx
        .tab
        .dispatch(Command::CreateChannel {
            id: id.to_string(),
            name: name.to_string(),
            commander,
            members,
        })
        .await?;
    report(&transition, &format!("Channel #{id} created."));
    Ok(())
}

pub async fn join_channel(ctx: &mut Context, id: &str, member: &str) -> Result<()> {
    ctx.require_dashboard().await?;
    let transition = ctx
        .tab
        .dispatch(Command::JoinChannel {
            id: id.to_string(),
            member: member.to_string(),
        })
        .await?;
    report(&transition, &format!("{member} joined #{id}."));
    Ok(())
}

pub async fn dissolve_channel(ctx: &mut Context, id: &str) -> Result<()> {
    ctx.require_dashboard().await?;
    match ctx.tab.dissolve_channel(id).await {
        Ok(transition) => {
            report(&transition, &format!("Channel #{id} dissolved."));
            Ok(())
        }
        Err(e) if e.is_unauthorized() => {
            println!("{}", e.user_message());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn add_agent(ctx: &mut Context, codename: &str, role: &str, status: &str) -> Result<()> {
    ctx.require_dashboard().await?;
    let status: AgentStatus = status.parse()?;
    let transition = ctx
        .tab
        .dispatch(Command::AddAgent {
            codename: codename.to_string(),
            role: role.to_string(),
            status,
        })
        .await?;
    report(&transition, &format!("{codename} added to the roster."));
    Ok(())
}

pub async fn remove_agent(ctx: &mut Context, index: usize) -> Result<()> {
    ctx.require_dashboard().await?;
    let transition = ctx.tab.dispatch(Command::RemoveAgent { index }).await?;
    report(&transition, "Agent removed.");
    Ok(())
}

pub async fn file_report(ctx: &mut Context, title: &str, body: &str) -> Result<()> {
    ctx.require_dashboard().await?;
    let transition = ctx.tab.file_report(title, body).await?;
    report(&transition, "Report filed.");
    Ok(())
}

pub async fn remove_report(ctx: &mut Context, index: usize) -> Result<()> {
    ctx.require_dashboard().await?;
    let transition = ctx.tab.dispatch(Command::RemoveReport { index }).await?;
    report(&transition, "Report removed.");
    Ok(())
}

pub async fn add_intel(
    ctx: &mut Context,
    name: &str,
    location: &str,
    notes: &str,
    threat: &str,
) -> Result<()> {
    ctx.require_dashboard().await?;
    let threat: ThreatLevel = threat.parse()?;
    let transition = ctx
        .tab
        .dispatch(Command::AddIntelCard {
            name: name.to_string(),
            location: location.to_string(),
            notes: notes.to_string(),
            threat,
        })
        .await?;
    report(&transition, &format!("Intel card '{name}' added."));
    Ok(())
}

pub async fn remove_intel(ctx: &mut Context, index: usize) -> Result<()> {
    ctx.require_dashboard().await?;
    let transition = ctx.tab.dispatch(Command::RemoveIntelCard { index }).await?;
    report(&transition, "Intel card removed.");
    Ok(())
}

pub fn oracle(ctx: &Context, query: &str) {
    println!("{}", ctx.tab.oracle(query));
}

pub async fn notes(ctx: &mut Context, text: Option<&str>) -> Result<()> {
    match text {
        Some(text) => {
            ctx.require_dashboard().await?;
            ctx.tab.save_notes(text).await?;
            println!("Notes saved.");
        }
        None => println!("{}", ctx.tab.notes()),
    }
    Ok(())
}
