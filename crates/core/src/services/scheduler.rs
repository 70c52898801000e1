use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::time::interval;

use crate::models::portfolio::PortfolioSummary;
use crate::PortfolioTracker;

/// Drives periodic and on-demand refreshes, decoupled from the engine.
///
/// The engine knows nothing about timers; this scheduler owns them. Each
/// cycle locks the tracker, so refreshes are serialized and every published
/// summary corresponds to a single consistent point-in-time read. A failed
/// refresh is logged and the previously published summary stands.
pub struct RefreshScheduler {
    period: Duration,
}

impl RefreshScheduler {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Run the refresh loop until the shutdown signal flips to `true`.
    ///
    /// - A tick of the periodic timer triggers a refresh (the first tick
    ///   fires immediately, so subscribers get an initial summary).
    /// - A message on `trigger` forces a refresh right away, e.g. after
    ///   the user records a transaction.
    /// - Successful summaries are published on `publish`; failures leave
    ///   the last published value in place.
    pub async fn run(
        &self,
        tracker: Arc<Mutex<PortfolioTracker>>,
        publish: watch::Sender<Option<PortfolioSummary>>,
        mut trigger: mpsc::Receiver<()>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut timer = interval(self.period);

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    Self::refresh_and_publish(&tracker, &publish).await;
                }
                Some(()) = trigger.recv() => {
                    Self::refresh_and_publish(&tracker, &publish).await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        log::debug!("Refresh scheduler shutting down");
                        break;
                    }
                }
            }
        }
    }

    async fn refresh_and_publish(
        tracker: &Arc<Mutex<PortfolioTracker>>,
        publish: &watch::Sender<Option<PortfolioSummary>>,
    ) {
        let mut guard = tracker.lock().await;
        match guard.refresh().await {
            Ok(summary) => {
                // Ignore send errors: no subscribers just means nobody is
                // watching right now.
                let _ = publish.send(Some(summary));
            }
            Err(e) => {
                log::error!("Refresh failed, keeping last published summary: {e}");
            }
        }
    }
}
