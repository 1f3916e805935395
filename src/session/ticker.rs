use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

/// A repeating tick delivered over a channel by a background task.
///
/// Owns the task: [`Ticker::cancel`] or dropping the ticker aborts it.
/// Must be created inside a tokio runtime.
pub struct Ticker {
    task: JoinHandle<()>,
    ticks: mpsc::UnboundedReceiver<()>,
}

impl Ticker {
    /// First tick arrives one `period` after creation.
    pub fn every(period: Duration) -> Self {
        let (tx, ticks) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });

        Self { task, ticks }
    }

    /// Wait for the next tick. `None` once cancelled.
    pub async fn next(&mut self) -> Option<()> {
        self.ticks.recv().await
    }

    /// Number of ticks that arrived since the last call, without waiting.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while self.ticks.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    /// Stop the task and discard ticks that were already queued.
    pub fn cancel(&mut self) {
        if !self.task.is_finished() {
            debug!("cancelling ticker");
        }
        self.task.abort();
        self.ticks.close();
        while self.ticks.try_recv().is_ok() {}
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
