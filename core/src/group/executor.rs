//! Group execution: kickstart, the ramped launch, and the aggregation loop

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use crate::channel::ChannelConfig;
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::scheduler::RampScheduler;
use crate::traits::TestPlanFactory;

use super::aggregator;
use super::counters::{GroupCounters, GroupSnapshot};

/// Coordinator for one ramped load-generation run
///
/// A group launches its threads staggered across the configured ramp
/// window, then aggregates their lifecycle events into live counters.
/// The aggregation loop is the only writer of the counters; any number
/// of tasks may observe them concurrently through [`Group::counters`].
pub struct Group {
    pub(crate) config: RunConfig,
    pub(crate) factory: Arc<dyn TestPlanFactory>,
    pub(crate) channel_config: ChannelConfig,
    pub(crate) counters: Arc<GroupCounters>,
    pub(crate) shutdown_tx: broadcast::Sender<()>,
}

impl Group {
    /// Create a new group
    ///
    /// Use [`GroupBuilder`](super::GroupBuilder) for a more ergonomic,
    /// validated construction.
    pub fn new(
        config: RunConfig,
        factory: Arc<dyn TestPlanFactory>,
        channel_config: ChannelConfig,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            factory,
            channel_config,
            counters: Arc::new(GroupCounters::new()),
            shutdown_tx,
        }
    }

    /// Live counters for concurrent, read-only observation
    pub fn counters(&self) -> Arc<GroupCounters> {
        Arc::clone(&self.counters)
    }

    /// Point-in-time copy of the counters and error log
    pub fn snapshot(&self) -> GroupSnapshot {
        self.counters.snapshot()
    }

    /// Get a shutdown signal receiver
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Stop launching further threads and wind the run down
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Get the run configuration
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the group: global setup, ramped launch, event aggregation
    ///
    /// Runs the plan's global setup exactly once, then launches threads
    /// in the background while this task becomes the single consumer of
    /// the activity stream. Blocks until every thread has finished and
    /// the stream closes, or until [`Group::shutdown`] is signaled, in
    /// which case the remaining in-flight events are drained before
    /// returning so the final counters stay consistent.
    ///
    /// One run per group at a time; kickstarting again afterwards resets
    /// the counters and starts a fresh run.
    ///
    /// # Errors
    ///
    /// * [`Error::Setup`] if global setup fails; no thread is launched.
    /// * [`Error::Protocol`] if an out-of-contract event would corrupt
    ///   the counters; shutdown is broadcast before returning.
    pub async fn kickstart(&self) -> Result<()> {
        self.counters.reset(self.config.threads);

        // One plan instance just for global setup, before anything runs.
        let plan = self.factory.create(0, None);
        if let Err(e) = plan.global_setup().await {
            tracing::error!(plan = plan.name(), error = %e, "Global setup failed");
            return Err(Error::Setup(e));
        }

        tracing::info!(
            threads = self.config.threads,
            offset = self.config.offset,
            ramp_secs = self.config.ramp.as_secs_f64(),
            "Kickstarting group"
        );

        let (activity_tx, mut activity_rx) = mpsc::channel(self.channel_config.activity_buffer);

        let scheduler = RampScheduler::new(self.config.clone(), Arc::clone(&self.factory));
        let scheduler_handle =
            tokio::spawn(scheduler.run(activity_tx, self.shutdown_tx.subscribe()));

        let mut shutdown = self.shutdown_tx.subscribe();

        // Single consumer: events are applied strictly in arrival order,
        // one at a time.
        let outcome = loop {
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::debug!("Shutdown signaled, draining remaining activities");
                    break Ok(true);
                }

                activity = activity_rx.recv() => match activity {
                    Some(activity) => {
                        if let Err(e) = aggregator::apply(&self.counters, &activity) {
                            break Err(e);
                        }
                    }
                    None => break Ok(false),
                },
            }
        };

        match outcome {
            // Shutdown: the scheduler stops launching and every thread
            // winds down on the same signal; drain until the last sender
            // is gone.
            Ok(true) => {
                while let Some(activity) = activity_rx.recv().await {
                    aggregator::apply(&self.counters, &activity)?;
                }
            }
            // Stream closed: every thread already finished.
            Ok(false) => {}
            Err(e) => {
                let _ = self.shutdown_tx.send(());
                let _ = scheduler_handle.await;
                tracing::error!(error = %e, "Aborting run");
                return Err(e);
            }
        }

        let _ = scheduler_handle.await;

        let snapshot = self.counters.snapshot();
        tracing::info!(
            total = snapshot.total,
            actions = snapshot.actions,
            errors = snapshot.errors.len(),
            "Run complete"
        );

        Ok(())
    }

    /// Run with Ctrl+C signal handling
    ///
    /// Automatically winds the run down on Ctrl+C.
    pub async fn kickstart_with_signal_handling(&self) -> Result<()> {
        let shutdown_tx = self.shutdown_tx.clone();

        let signal_handle = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Received Ctrl+C, winding run down...");
                    let _ = shutdown_tx.send(());
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                }
            }
        });

        let result = self.kickstart().await;

        signal_handle.abort();

        result
    }

    /// Run with a timeout
    ///
    /// Automatically winds the run down when the timeout is reached.
    pub async fn kickstart_with_timeout(&self, timeout: Duration) -> Result<()> {
        let shutdown_tx = self.shutdown_tx.clone();

        let timeout_handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            tracing::info!("Timeout reached, winding run down...");
            let _ = shutdown_tx.send(());
        });

        let result = self.kickstart().await;

        timeout_handle.abort();

        result
    }
}

impl std::fmt::Debug for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("config", &self.config)
            .field("counters", &self.counters.snapshot())
            .finish()
    }
}
