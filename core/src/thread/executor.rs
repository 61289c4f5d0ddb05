//! Thread execution loop

use std::sync::Arc;

use tokio::sync::mpsc::error::SendError;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

use crate::activity::Activity;
use crate::traits::{PlanError, StopCondition, TestPlan};

use super::pacer::ActionPacer;

/// A single load-generation thread
///
/// Runs its test plan and emits one [`Activity`] per lifecycle
/// transition. Threads report failures only through the event stream,
/// never through return values.
pub struct Thread {
    id: usize,
    plan: Arc<dyn TestPlan>,
    activity_tx: mpsc::Sender<Activity>,
    pacer: ActionPacer,
    stop_condition: StopCondition,
}

impl Thread {
    /// Create a new thread
    pub fn new(
        id: usize,
        plan: Arc<dyn TestPlan>,
        activity_tx: mpsc::Sender<Activity>,
        pacer: ActionPacer,
        stop_condition: StopCondition,
    ) -> Self {
        Self {
            id,
            plan,
            activity_tx,
            pacer,
            stop_condition,
        }
    }

    /// Get the thread ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Run the thread lifecycle
    ///
    /// Emits `Launching`, initializes the plan, then performs paced
    /// actions until the stop condition or shutdown, closing with
    /// `Inactive`. Exits quietly if the activity stream is closed.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if self.send(Activity::launching(self.id)).await.is_err() {
            return;
        }

        if let Err(e) = self.plan.setup(self.id).await {
            tracing::warn!(thread_id = self.id, error = %e, "Thread setup failed");
            let _ = self.send(Activity::launch_failed(self.id)).await;
            return;
        }

        if self.send(Activity::active(self.id)).await.is_err() {
            return;
        }
        tracing::debug!(thread_id = self.id, plan = self.plan.name(), "Thread active");

        let started = Instant::now();
        let mut attempts = 0usize;

        loop {
            if self.should_stop(attempts, started) {
                tracing::debug!(thread_id = self.id, attempts, "Thread reached stop condition");
                break;
            }

            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::debug!(thread_id = self.id, "Thread received shutdown signal");
                    break;
                }

                result = self.perform_action() => {
                    attempts += 1;
                    let activity = match result {
                        Ok(()) => Activity::action(self.id),
                        Err(e) => {
                            tracing::warn!(thread_id = self.id, error = %e, "Action failed");
                            Activity::error(self.id, self.plan.name(), e)
                        }
                    };
                    if self.send(activity).await.is_err() {
                        return;
                    }
                }
            }
        }

        let _ = self.send(Activity::inactive(self.id)).await;
    }

    // Pacing applies before the work, so a paced thread settles into a
    // steady action cadence rather than bursting.
    async fn perform_action(&self) -> Result<(), PlanError> {
        self.pacer.wait().await;
        self.plan.action(self.id).await
    }

    async fn send(&self, activity: Activity) -> Result<(), SendError<Activity>> {
        self.activity_tx.send(activity).await
    }

    fn should_stop(&self, attempts: usize, started: Instant) -> bool {
        match &self.stop_condition {
            StopCondition::ActionCount(n) => attempts >= *n,
            StopCondition::Duration(d) => started.elapsed() >= *d,
            StopCondition::Indefinite => false,
        }
    }
}

impl std::fmt::Debug for Thread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thread")
            .field("id", &self.id)
            .field("plan", &self.plan.name())
            .field("pacer", &self.pacer)
            .field("stop_condition", &self.stop_condition)
            .finish()
    }
}
