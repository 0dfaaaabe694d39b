use std::sync::Arc;

use intranet_application::{IntranetController, Origin};
use intranet_core::clock::ManualClock;
use intranet_core::session::{SessionPhase, TickOutcome};
use intranet_core::state::{ApplicationState, Command, ExportFormat};
use intranet_core::view::{MemoryViewSink, Panel};

const NOV_14_2023: i64 = 1_700_000_000_000;

async fn open() -> (IntranetController<MemoryViewSink>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(NOV_14_2023));
    let origin = Origin::in_memory(clock.clone());
    let (tab, _sync) = origin.open_tab(MemoryViewSink::new()).await.unwrap();
    (tab, clock)
}

async fn open_logged_in(agent: &str) -> (IntranetController<MemoryViewSink>, Arc<ManualClock>) {
    let (mut tab, clock) = open().await;
    tab.login(agent).await.unwrap();
    tab.accept_protocols().await.unwrap();
    (tab, clock)
}

#[tokio::test]
async fn test_post_status_appends_one_message() {
    let (mut tab, _) = open_logged_in("CHIEF-01").await;
    let before = tab.state().channel("alpha").unwrap().messages.len();
    let chat_before = tab.views().markup(Panel::Chat).to_string();

    tab.post_message("status?").await.unwrap();

    let alpha = tab.state().channel("alpha").unwrap();
    assert_eq!(alpha.members.len(), 3);
    assert_eq!(alpha.messages.len(), before + 1);
    let last = alpha.messages.last().unwrap();
    assert_eq!(last.sender, "CHIEF-01");
    assert_eq!(last.text, "status?");
    assert_eq!(last.timestamp, "22:13");

    let chat = tab.views().markup(Panel::Chat);
    assert_eq!(chat.matches("status?").count(), 1);
    let closing = "</ul>";
    let head = chat_before.strip_suffix("</ul></section>").unwrap();
    assert!(chat.starts_with(head));
    assert!(chat.ends_with(&format!("status?</li>{closing}</section>")));

    // Persisted: a fresh load sees it.
    tab.load().await.unwrap();
    assert_eq!(tab.state().channel("alpha").unwrap().messages.len(), before + 1);
}

#[tokio::test]
async fn test_post_requires_login() {
    let (mut tab, _) = open().await;
    let err = tab.post_message("status?").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(tab.state(), &ApplicationState::seed());
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let (mut tab, _) = open_logged_in("CHIEF-01").await;
    let mounts = tab.views().mount_count();

    let transition = tab.post_message("   ").await.unwrap();
    assert!(transition.is_noop());
    let transition = tab
        .dispatch(Command::AddAgent {
            codename: String::new(),
            role: "Courier".to_string(),
            status: Default::default(),
        })
        .await
        .unwrap();
    assert!(transition.is_noop());

    assert_eq!(tab.views().mount_count(), mounts);
    assert_eq!(tab.state(), &ApplicationState::seed());
}

#[tokio::test]
async fn test_session_expires_exactly_once() {
    let (mut tab, clock) = open_logged_in("VIPER-07").await;
    assert_eq!(
        tab.tick().await.unwrap(),
        TickOutcome::Active { remaining_secs: 600 }
    );

    clock.advance_secs(600);
    assert_eq!(tab.tick().await.unwrap(), TickOutcome::Expired);
    assert_eq!(tab.tick().await.unwrap(), TickOutcome::Locked);
    assert_eq!(tab.tick().await.unwrap(), TickOutcome::Locked);
    assert_eq!(tab.phase().await.unwrap(), SessionPhase::Locked);
    assert!(tab.views().markup(Panel::Session).contains("Authentication required"));

    // Only a fresh login brings the dashboard back, after protocols again.
    tab.login("VIPER-07").await.unwrap();
    assert_eq!(tab.phase().await.unwrap(), SessionPhase::AwaitingProtocols);
}

#[tokio::test]
async fn test_timer_panel_counts_down() {
    let (mut tab, clock) = open_logged_in("CHIEF-01").await;
    clock.advance_secs(75);
    tab.tick().await.unwrap();
    assert!(tab.views().markup(Panel::Session).contains("08:45"));
}

#[tokio::test]
async fn test_export_import_round_trip() {
    for format in [ExportFormat::Json, ExportFormat::Base64] {
        let (tab, _) = open_logged_in("CHIEF-01").await;
        let mut tab = tab.with_export_format(format);
        tab.post_message("status?").await.unwrap();
        tab.dispatch(Command::RemoveIntelCard { index: 1 }).await.unwrap();
        let snapshot = tab.state().clone();

        let artifact = tab.export_blob().unwrap();
        assert!(artifact.file_name.starts_with("intranet-export-20231114-2213"));

        tab.dispatch(Command::RemoveAgent { index: 0 }).await.unwrap();
        assert_ne!(tab.state(), &snapshot);

        tab.import_blob(&artifact.contents).await.unwrap();
        assert_eq!(tab.state(), &snapshot);
        tab.load().await.unwrap();
        assert_eq!(tab.state(), &snapshot);
    }
}

#[tokio::test]
async fn test_invalid_import_changes_nothing() {
    let (mut tab, _) = open_logged_in("CHIEF-01").await;
    tab.post_message("status?").await.unwrap();
    let state = tab.state().clone();
    let mounts = tab.views().mount_count();

    for raw in ["{\"channels\": 7}", "%%% not base64 %%%", ""] {
        let err = tab.import_blob(raw).await.unwrap_err();
        assert!(err.is_invalid_import(), "{raw:?} gave {err:?}");
        assert_eq!(
            err.user_message(),
            "Invalid import: the file is not a valid intranet export."
        );
    }

    assert_eq!(tab.state(), &state);
    assert_eq!(tab.views().mount_count(), mounts);
    tab.load().await.unwrap();
    assert_eq!(tab.state(), &state);
}

#[tokio::test]
async fn test_dissolving_active_channel_falls_back() {
    let (mut tab, _) = open_logged_in("CHIEF-01").await;
    tab.dissolve_channel("alpha").await.unwrap();

    assert!(tab.state().channel("alpha").is_none());
    assert_eq!(tab.state().active_channel_id, "bravo");
    assert!(tab.views().markup(Panel::Chat).contains("Bravo Relay"));
}

#[tokio::test]
async fn test_non_commander_cannot_dissolve() {
    let (mut tab, _) = open_logged_in("ORCA-12").await;
    let err = tab.dissolve_channel("alpha").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(tab.state(), &ApplicationState::seed());
}

#[tokio::test]
async fn test_render_is_idempotent() {
    let (mut tab, _) = open_logged_in("CHIEF-01").await;
    for panel in Panel::ALL {
        tab.render_panel(panel).await.unwrap();
        let first = tab.views().markup(panel).to_string();
        tab.render_panel(panel).await.unwrap();
        assert_eq!(tab.views().markup(panel), first, "{panel:?}");
    }
}

#[tokio::test]
async fn test_row_removal_rerenders_list() {
    let (mut tab, _) = open_logged_in("CHIEF-01").await;
    assert!(tab.views().markup(Panel::Agents).contains("ORCA-12"));

    tab.dispatch(Command::RemoveAgent { index: 2 }).await.unwrap();

    assert!(!tab.views().markup(Panel::Agents).contains("ORCA-12"));
    assert_eq!(tab.state().agents.len(), 2);
}

#[tokio::test]
async fn test_oracle_over_current_cards() {
    let (mut tab, _) = open().await;
    let answer = tab.oracle("zurich");
    assert_eq!(answer.matches().len(), 1);
    assert_eq!(answer.matches()[0].name, "Obsidian Ledger");

    tab.dispatch(Command::RemoveIntelCard { index: 1 }).await.unwrap();
    assert!(tab.oracle("zurich").matches().is_empty());
}
