//! Session countdown ticker.

use std::sync::Arc;
use std::time::Duration;

use intranet_core::view::ViewSink;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::warn;

use crate::controller::IntranetController;

/// Calls [`IntranetController::tick`] every `period` until the task is
/// aborted or dropped with its runtime.
///
/// A failed tick is logged and the countdown keeps going.
pub fn spawn_ticker<S>(
    controller: Arc<Mutex<IntranetController<S>>>,
    period: Duration,
) -> JoinHandle<()>
where
    S: ViewSink + 'static,
{
    tokio::spawn(async move {
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            timer.tick().await;
            let mut tab = controller.lock().await;
            if let Err(e) = tab.tick().await {
                warn!(tab = %tab.tab(), error = %e, "[Ticker] Tick failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use intranet_core::clock::ManualClock;
    use intranet_core::session::SessionPhase;
    use intranet_core::view::MemoryViewSink;

    use crate::bootstrap::Origin;

    #[tokio::test(start_paused = true)]
    async fn test_ticker_expires_session() {
        let clock = Arc::new(ManualClock::new(0));
        let origin = Origin::in_memory(clock.clone());
        let (mut tab, _sync) = origin.open_tab(MemoryViewSink::new()).await.unwrap();
        tab.login("CHIEF-01").await.unwrap();
        tab.accept_protocols().await.unwrap();

        let tab = Arc::new(Mutex::new(tab));
        let handle = spawn_ticker(tab.clone(), Duration::from_secs(1));

        clock.advance_secs(601);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let guard = tab.lock().await;
        assert_eq!(guard.phase().await.unwrap(), SessionPhase::Locked);
        assert!(guard.views().markup(intranet_core::view::Panel::Session).contains("locked"));
        drop(guard);
        handle.abort();
    }
}
