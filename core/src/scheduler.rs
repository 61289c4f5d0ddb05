//! Ramp scheduler: staggered thread launch
//!
//! Spreads thread starts evenly across the configured ramp window so load
//! increases gradually rather than as a step function. The scheduler
//! emits no activities itself; its only externally visible effect is the
//! cadence of thread starts. It does not supervise the threads it
//! launches; a thread's own failures are reported asynchronously on the
//! activity stream.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use crate::activity::Activity;
use crate::config::RunConfig;
use crate::thread::{ActionPacer, Thread};
use crate::traits::TestPlanFactory;

pub(crate) struct RampScheduler {
    config: RunConfig,
    factory: Arc<dyn TestPlanFactory>,
}

impl RampScheduler {
    pub(crate) fn new(config: RunConfig, factory: Arc<dyn TestPlanFactory>) -> Self {
        Self { config, factory }
    }

    /// Inter-launch delay for the given ramp window and thread count
    ///
    /// `None` when there is nothing to launch; the division is guarded so
    /// a zero thread count can never panic.
    fn launch_interval(ramp: Duration, threads: usize) -> Option<Duration> {
        if threads == 0 {
            return None;
        }
        Some(ramp / threads as u32)
    }

    /// Launch every thread, pausing the inter-launch delay between starts
    ///
    /// Consumes the activity sender: once the scheduler and the threads
    /// it spawned are done, the stream closes and the aggregation loop
    /// ends with it. Stops launching as soon as shutdown is signaled.
    pub(crate) async fn run(
        self,
        activity_tx: mpsc::Sender<Activity>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let Some(interval) = Self::launch_interval(self.config.ramp, self.config.threads) else {
            tracing::warn!("No threads to launch");
            return;
        };

        tracing::debug!(
            threads = self.config.threads,
            interval_ms = interval.as_millis() as u64,
            "Ramp scheduler started"
        );

        let end = self.config.offset + self.config.threads;
        for id in self.config.offset..end {
            let plan = self.factory.create(id, None);
            let thread = Thread::new(
                id,
                plan,
                activity_tx.clone(),
                ActionPacer::new(self.config.pacing),
                self.config.stop_condition.clone(),
            );

            tokio::spawn(thread.run(shutdown.resubscribe()));

            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!(
                        launched = id + 1 - self.config.offset,
                        "Launch ramp interrupted by shutdown"
                    );
                    return;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }

        tracing::debug!(threads = self.config.threads, "Launch ramp complete");
    }
}
