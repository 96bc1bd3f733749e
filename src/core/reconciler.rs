//! Reconciliation loop.
//!
//! A single background task that, once per tick, walks every registered
//! display and issues the command matching its playback intent. The loop
//! never changes display state itself.

use crate::core::display::{DisplayRegistry, ReconcileAction};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Counts from one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub idle_images: usize,
    pub keep_alives: usize,
    pub suppressed: usize,
    pub failed: usize,
}

impl TickSummary {
    fn record(&mut self, action: ReconcileAction) {
        match action {
            ReconcileAction::ShowedIdle => self.idle_images += 1,
            ReconcileAction::KeptAlive => self.keep_alives += 1,
            ReconcileAction::Suppressed => self.suppressed += 1,
        }
    }
}

/// Reconcile every display once.
///
/// A failing display is logged and skipped; the rest of the tick still runs.
pub async fn run_tick(displays: &DisplayRegistry) -> TickSummary {
    let mut summary = TickSummary::default();

    for entry in displays.snapshot() {
        match entry.reconcile().await {
            Ok(action) => summary.record(action),
            Err(e) => {
                summary.failed += 1;
                let name = entry.name();
                tracing::warn!("{}: reconcile failed: {}", name, e);
            }
        }
    }

    tracing::trace!("Tick done: {:?}", summary);
    summary
}

/// Configured but not yet running loop.
#[derive(Debug)]
pub struct Reconciler {
    displays: Arc<DisplayRegistry>,
    period: Duration,
}

impl Reconciler {
    pub fn new(displays: Arc<DisplayRegistry>, period: Duration) -> Self {
        Self { displays, period }
    }

    /// Start the loop on the tokio runtime.
    pub fn spawn(self) -> ReconcilerHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tracing::info!(
            "Reconciliation loop started ({} displays, every {:?})",
            self.displays.len(),
            self.period
        );

        let task = tokio::spawn(async move {
            let mut ticks: u64 = 0;
            loop {
                if token.is_cancelled() {
                    break;
                }
                run_tick(&self.displays).await;
                ticks += 1;

                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(self.period) => {}
                }
            }
            tracing::info!("Reconciliation loop stopped after {} ticks", ticks);
            ticks
        });

        ReconcilerHandle { cancel, task }
    }
}

/// Handle to a running loop.
#[derive(Debug)]
pub struct ReconcilerHandle {
    cancel: CancellationToken,
    task: JoinHandle<u64>,
}

impl ReconcilerHandle {
    /// Token that stops the loop when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop after the current tick and wait for the task. Returns the number
    /// of ticks that ran.
    pub async fn shutdown(self) -> u64 {
        self.cancel.cancel();
        match self.task.await {
            Ok(ticks) => ticks,
            Err(e) => {
                tracing::error!("Reconciliation task failed: {}", e);
                0
            }
        }
    }

    /// Kill the task immediately, without waiting for the current tick or any
    /// in-flight device call.
    pub fn abort(self) {
        self.cancel.cancel();
        self.task.abort();
        tracing::debug!("Reconciliation loop aborted");
    }
}
