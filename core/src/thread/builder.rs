//! Builder pattern for Thread construction

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::activity::Activity;
use crate::error::{Error, Result};
use crate::traits::{StopCondition, TestPlan};

use super::executor::Thread;
use super::pacer::ActionPacer;

/// Builder for creating [`Thread`] instances
///
/// # Example
/// ```ignore
/// let thread = ThreadBuilder::new(0)
///     .plan(plan)
///     .activity_tx(tx)
///     .pacing(Some(10.0))
///     .stop_condition(StopCondition::ActionCount(100))
///     .build()?;
/// ```
pub struct ThreadBuilder {
    id: usize,
    plan: Option<Arc<dyn TestPlan>>,
    activity_tx: Option<mpsc::Sender<Activity>>,
    pacing: Option<f64>,
    stop_condition: Option<StopCondition>,
}

impl ThreadBuilder {
    /// Create a new builder with the given thread ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            plan: None,
            activity_tx: None,
            pacing: None,
            stop_condition: None,
        }
    }

    /// Set the test plan
    pub fn plan(mut self, plan: Arc<dyn TestPlan>) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Set the activity stream sender
    pub fn activity_tx(mut self, tx: mpsc::Sender<Activity>) -> Self {
        self.activity_tx = Some(tx);
        self
    }

    /// Set the action pacing (actions per second)
    pub fn pacing(mut self, aps: Option<f64>) -> Self {
        self.pacing = aps;
        self
    }

    /// Set the stop condition
    pub fn stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = Some(condition);
        self
    }

    /// Build the thread
    ///
    /// # Errors
    /// Returns an error if any required field is missing.
    pub fn build(self) -> Result<Thread> {
        let plan = self.plan.ok_or_else(|| Error::missing_config("plan"))?;
        let activity_tx = self
            .activity_tx
            .ok_or_else(|| Error::missing_config("activity_tx"))?;

        Ok(Thread::new(
            self.id,
            plan,
            activity_tx,
            ActionPacer::new(self.pacing),
            self.stop_condition.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::PlanError;
    use async_trait::async_trait;
    use std::result::Result;

    struct NoopPlan;

    #[async_trait]
    impl TestPlan for NoopPlan {
        fn name(&self) -> &str {
            "noop"
        }
        async fn global_setup(&self) -> Result<(), PlanError> {
            Ok(())
        }
        async fn setup(&self, _thread_id: usize) -> Result<(), PlanError> {
            Ok(())
        }
        async fn action(&self, _thread_id: usize) -> Result<(), PlanError> {
            Ok(())
        }
    }

    #[test]
    fn test_builder_missing_plan() {
        let (tx, _rx) = mpsc::channel(1);
        let result = ThreadBuilder::new(0).activity_tx(tx).build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("plan"));
    }

    #[test]
    fn test_builder_missing_activity_tx() {
        let result = ThreadBuilder::new(0).plan(Arc::new(NoopPlan)).build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("activity_tx"));
    }

    #[test]
    fn test_builder_defaults_to_indefinite() {
        let (tx, _rx) = mpsc::channel(1);
        let thread = ThreadBuilder::new(3)
            .plan(Arc::new(NoopPlan))
            .activity_tx(tx)
            .build()
            .expect("build thread");

        assert_eq!(thread.id(), 3);
    }
}
