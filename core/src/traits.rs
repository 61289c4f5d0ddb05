//! Core traits for test plans
//!
//! These traits are the seam between the coordination core and the
//! user-supplied work: the core calls them, implementations live with the
//! caller (or in the binary for the demo plan).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Plan Trait
// ============================================================================

/// A user-defined unit of work executed by every thread in a group
///
/// A plan instance is created per thread by a [`TestPlanFactory`].
/// `global_setup` runs exactly once before any thread launches; `setup`
/// runs once per thread during launch; `action` is invoked repeatedly
/// while the thread is active.
#[async_trait]
pub trait TestPlan: Send + Sync {
    /// Plan name for identification and logging
    fn name(&self) -> &str;

    /// One-time setup for the whole run
    ///
    /// Called exactly once, synchronously with kickstart, before any
    /// thread is launched. An error aborts the entire run.
    async fn global_setup(&self) -> Result<(), PlanError>;

    /// Per-thread initialization
    ///
    /// An error here is reported as a launch failure; the thread never
    /// becomes active.
    async fn setup(&self, thread_id: usize) -> Result<(), PlanError>;

    /// One discrete unit of work
    ///
    /// An error is reported on the event stream and does not stop the
    /// thread.
    async fn action(&self, thread_id: usize) -> Result<(), PlanError>;
}

/// Factory mapping a thread identity to a runnable test plan
///
/// `prior` carries the plan of a previous incarnation when a caller
/// rebuilds plans across runs; `None` on first construction.
pub trait TestPlanFactory: Send + Sync {
    /// Create the plan instance for the given thread
    fn create(&self, thread_id: usize, prior: Option<Arc<dyn TestPlan>>) -> Arc<dyn TestPlan>;
}

impl<F> TestPlanFactory for F
where
    F: Fn(usize, Option<Arc<dyn TestPlan>>) -> Arc<dyn TestPlan> + Send + Sync,
{
    fn create(&self, thread_id: usize, prior: Option<Arc<dyn TestPlan>>) -> Arc<dyn TestPlan> {
        self(thread_id, prior)
    }
}

/// Test-plan errors
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Setup failed (global or per-thread)
    #[error("setup failed: {0}")]
    Setup(String),

    /// A work action failed
    #[error("action failed: {0}")]
    Action(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Stop Condition
// ============================================================================

/// Thread stop condition
///
/// Applied per thread; independent of the group-level shutdown signal,
/// which always stops a thread regardless of its condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StopCondition {
    /// Stop after attempting N actions
    ActionCount(usize),

    /// Stop after the given duration of activity
    Duration(Duration),

    /// Run until shutdown is signaled
    Indefinite,
}

impl Default for StopCondition {
    fn default() -> Self {
        StopCondition::Indefinite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_condition_default() {
        assert!(matches!(StopCondition::default(), StopCondition::Indefinite));
    }

    #[test]
    fn test_plan_error_display() {
        let err = PlanError::Action("connection refused".into());
        assert_eq!(err.to_string(), "action failed: connection refused");
    }

    #[test]
    fn test_factory_closure_impl() {
        struct Noop;

        #[async_trait]
        impl TestPlan for Noop {
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

        let factory =
            |_id: usize, _prior: Option<Arc<dyn TestPlan>>| Arc::new(Noop) as Arc<dyn TestPlan>;
        let plan = factory.create(4, None);
        assert_eq!(plan.name(), "noop");
    }
}
