use std::time::Duration;

use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::time::format_elapsed;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Background task that keeps an `mm:ss` elapsed-time display current.
///
/// It only reads the session start time. Dropping the ticker aborts the task.
#[derive(Debug)]
pub struct ElapsedTicker {
    handle: JoinHandle<()>,
    display: watch::Receiver<String>,
}

impl ElapsedTicker {
    /// Spawn a ticker on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn(clock: Clock, started_at: DateTime<Utc>, every: Duration) -> Self {
        let every = every.max(Duration::from_millis(1));
        let (tx, display) = watch::channel(format_elapsed(clock.elapsed_since(started_at)));

        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(every);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                if tx.is_closed() {
                    break;
                }
                let next = format_elapsed(clock.elapsed_since(started_at));
                tx.send_if_modified(|current| {
                    if *current == next {
                        false
                    } else {
                        *current = next;
                        true
                    }
                });
            }
        });

        Self { handle, display }
    }

    /// A receiver that observes every display change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.display.clone()
    }

    /// Most recently published display string.
    #[must_use]
    pub fn current(&self) -> String {
        self.display.borrow().clone()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
