use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod sink;

use commands::Context;
use intranet_core::view::Panel;
use sink::ConsoleSink;

#[derive(Parser)]
#[command(name = "intranet")]
#[command(about = "Spy agency intranet - local session, state and sync core", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage file, overriding `storage.data_file`
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session as AGENT
    Login { agent: String },
    /// Accept the operating protocols
    Accept,
    /// Show the session phase and remaining time
    Status,
    /// End the session
    Logout,
    /// Post a message to the active channel
    Post { text: Vec<String> },
    /// Make another channel active
    Switch { channel: String },
    /// Manage channels
    Channel {
        #[command(subcommand)]
        action: ChannelAction,
    },
    /// Manage the agent roster
    Agent {
        #[command(subcommand)]
        action: AgentAction,
    },
    /// Manage field reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },
    /// Manage intel cards
    Intel {
        #[command(subcommand)]
        action: IntelAction,
    },
    /// Ask the Oracle about the intel cards
    Oracle { query: Vec<String> },
    /// Show personal notes, or replace them with TEXT
    Notes { text: Option<String> },
    /// Write the full state to an export file
    Export {
        /// Output directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Encode as base64 instead of JSON
        #[arg(long)]
        base64: bool,
    },
    /// Replace the full state with an export file
    Import { file: PathBuf },
    /// Print the markup of one panel, or all of them
    Render { panel: Option<String> },
    /// Follow the session countdown until it expires
    Watch,
    /// Apply a landing page theme
    Theme {
        primary: Option<String>,
        secondary: Option<String>,
        #[arg(long, default_value_t = 80)]
        glow: u8,
        /// Pick a preset at random
        #[arg(long)]
        surprise: bool,
    },
    /// Compute the tilt of a landing page tile under the pointer
    Tilt {
        #[arg(allow_negative_numbers = true)]
        left: f64,
        #[arg(allow_negative_numbers = true)]
        top: f64,
        width: f64,
        height: f64,
        /// Pointer x; omit both coordinates when the pointer left the tile
        #[arg(long, requires = "y", allow_negative_numbers = true)]
        x: Option<f64>,
        #[arg(long, requires = "x", allow_negative_numbers = true)]
        y: Option<f64>,
    },
    /// Bundle the landing site into a zip archive
    Bundle {
        /// Directory holding index.html, styles.css and app.js
        #[arg(long, default_value = ".")]
        site_dir: PathBuf,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Simulate the landing page starfield
    Starfield {
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 720.0)]
        height: f64,
        #[arg(long, default_value_t = 60)]
        frames: u32,
    },
}

#[derive(Subcommand)]
enum ChannelAction {
    /// Create a channel commanded by the logged-in agent
    Create {
        id: String,
        name: String,
        /// Additional members
        #[arg(long = "member")]
        members: Vec<String>,
    },
    /// Add a member to a channel
    Join { id: String, member: String },
    /// Dissolve a channel (commander only)
    Dissolve { id: String },
}

#[derive(Subcommand)]
enum AgentAction {
    Add {
        codename: String,
        role: String,
        #[arg(long, default_value = "active")]
        status: String,
    },
    Remove { index: usize },
}

#[derive(Subcommand)]
enum ReportAction {
    /// File a report as the logged-in agent
    Add { title: String, body: String },
    Remove { index: usize },
}

#[derive(Subcommand)]
enum IntelAction {
    Add {
        name: String,
        location: String,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long, default_value = "medium")]
        threat: String,
    },
    Remove { index: usize },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Commands that never touch the store.
    match &cli.command {
        Commands::Theme {
            primary,
            secondary,
            glow,
            surprise,
        } => {
            return commands::landing::theme(
                primary.as_deref(),
                secondary.as_deref(),
                *glow,
                *surprise,
            );
        }
        Commands::Tilt {
            left,
            top,
            width,
            height,
            x,
            y,
        } => {
            let pointer = x.zip(*y);
            commands::landing::tilt(*left, *top, *width, *height, pointer);
            return Ok(());
        }
        Commands::Bundle { site_dir, out } => {
            return commands::landing::bundle(site_dir, out).await;
        }
        Commands::Starfield {
            width,
            height,
            frames,
        } => {
            commands::landing::starfield(*width, *height, *frames);
            return Ok(());
        }
        _ => {}
    }

    let views = match &cli.command {
        Commands::Watch => ConsoleSink::echoing([Panel::Session]),
        _ => ConsoleSink::quiet(),
    };
    let mut ctx = Context::open(cli.config, cli.data_file, views).await?;

    match cli.command {
        Commands::Login { agent } => commands::session::login(&mut ctx, &agent).await?,
        Commands::Accept => commands::session::accept(&mut ctx).await?,
        Commands::Status => commands::session::status(&ctx).await?,
        Commands::Logout => commands::session::logout(&mut ctx).await?,
        Commands::Watch => commands::session::watch(ctx).await?,
        Commands::Post { text } => commands::board::post(&mut ctx, &text.join(" ")).await?,
        Commands::Switch { channel } => commands::board::switch(&mut ctx, &channel).await?,
        Commands::Channel { action } => match action {
            ChannelAction::Create { id, name, members } => {
                commands::board::create_channel(&mut ctx, &id, &name, members).await?
            }
            ChannelAction::Join { id, member } => {
                commands::board::join_channel(&mut ctx, &id, &member).await?
            }
            ChannelAction::Dissolve { id } => {
                commands::board::dissolve_channel(&mut ctx, &id).await?
            }
        },
        Commands::Agent { action } => match action {
            AgentAction::Add {
                codename,
                role,
                status,
            } => commands::board::add_agent(&mut ctx, &codename, &role, &status).await?,
            AgentAction::Remove { index } => {
                commands::board::remove_agent(&mut ctx, index).await?
            }
        },
        Commands::Report { action } => match action {
            ReportAction::Add { title, body } => {
                commands::board::file_report(&mut ctx, &title, &body).await?
            }
            ReportAction::Remove { index } => {
                commands::board::remove_report(&mut ctx, index).await?
            }
        },
        Commands::Intel { action } => match action {
            IntelAction::Add {
                name,
                location,
                notes,
                threat,
            } => {
                commands::board::add_intel(&mut ctx, &name, &location, &notes, &threat).await?
            }
            IntelAction::Remove { index } => {
                commands::board::remove_intel(&mut ctx, index).await?
            }
        },
        Commands::Oracle { query } => commands::board::oracle(&ctx, &query.join(" ")),
        Commands::Notes { text } => commands::board::notes(&mut ctx, text.as_deref()).await?,
        Commands::Export { dir, base64 } => commands::archive::export(&ctx, &dir, base64).await?,
        Commands::Import { file } => commands::archive::import(&mut ctx, &file).await?,
        Commands::Render { panel } => commands::view::render(&ctx, panel.as_deref())?,
        Commands::Theme { .. }
        | Commands::Tilt { .. }
        | Commands::Bundle { .. }
        | Commands::Starfield { .. } => {}
    }

    Ok(())
}
