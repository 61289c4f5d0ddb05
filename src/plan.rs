//! Built-in demo test plan: simulated work for smoke-testing a group

use std::time::Duration;

use async_trait::async_trait;
use stampede_core::{PlanError, TestPlan};

/// Test plan that simulates work by sleeping per action
pub struct DemoPlan {
    action_delay: Duration,
}

impl DemoPlan {
    pub fn new(action_delay: Duration) -> Self {
        Self { action_delay }
    }
}

#[async_trait]
impl TestPlan for DemoPlan {
    fn name(&self) -> &str {
        "demo"
    }

    async fn global_setup(&self) -> Result<(), PlanError> {
        tracing::info!("Demo plan global setup");
        Ok(())
    }

    async fn setup(&self, thread_id: usize) -> Result<(), PlanError> {
        tracing::debug!(thread_id, "Demo plan thread setup");
        Ok(())
    }

    async fn action(&self, _thread_id: usize) -> Result<(), PlanError> {
        tokio::time::sleep(self.action_delay).await;
        Ok(())
    }
}
