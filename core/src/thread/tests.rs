//! Integration tests for the Thread module

use super::*;
use crate::activity::{Activity, ActivityStatus};
use crate::traits::{PlanError, StopCondition, TestPlan};

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

// ============================================================================
// Mock TestPlan
// ============================================================================

struct MockPlan {
    name: String,
    fail_setup: bool,
    fail_action_every: Option<usize>,
    action_delay: Option<Duration>,
    actions: AtomicUsize,
}

impl MockPlan {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail_setup: false,
            fail_action_every: None,
            action_delay: None,
            actions: AtomicUsize::new(0),
        }
    }

    fn with_fail_setup(mut self) -> Self {
        self.fail_setup = true;
        self
    }

    fn with_fail_action_every(mut self, n: usize) -> Self {
        self.fail_action_every = Some(n);
        self
    }

    fn with_action_delay(mut self, delay: Duration) -> Self {
        self.action_delay = Some(delay);
        self
    }
}

#[async_trait]
impl TestPlan for MockPlan {
    fn name(&self) -> &str {
        &self.name
    }

    async fn global_setup(&self) -> Result<(), PlanError> {
        Ok(())
    }

    async fn setup(&self, _thread_id: usize) -> Result<(), PlanError> {
        if self.fail_setup {
            return Err(PlanError::Setup("simulated setup failure".into()));
        }
        Ok(())
    }

    async fn action(&self, _thread_id: usize) -> Result<(), PlanError> {
        let count = self.actions.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.action_delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(every) = self.fail_action_every {
            if count % every == every - 1 {
                return Err(PlanError::Action("simulated action failure".into()));
            }
        }

        Ok(())
    }
}

async fn collect(rx: &mut mpsc::Receiver<Activity>) -> Vec<Activity> {
    let mut events = Vec::new();
    while let Some(activity) = rx.recv().await {
        events.push(activity);
    }
    events
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_thread_emits_full_lifecycle() {
    let (tx, mut rx) = mpsc::channel(64);
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let thread = ThreadBuilder::new(7)
        .plan(Arc::new(MockPlan::new("mock")))
        .activity_tx(tx)
        .stop_condition(StopCondition::ActionCount(3))
        .build()
        .expect("build thread");

    thread.run(shutdown_rx).await;
    drop(shutdown_tx);

    let events = collect(&mut rx).await;
    let statuses: Vec<_> = events.iter().map(|a| a.status).collect();
    assert_eq!(
        statuses,
        vec![
            ActivityStatus::Launching,
            ActivityStatus::Active,
            ActivityStatus::Action,
            ActivityStatus::Action,
            ActivityStatus::Action,
            ActivityStatus::Inactive,
        ]
    );
    assert!(events.iter().all(|a| a.id == 7));
}

#[tokio::test]
async fn test_thread_setup_failure_reports_launch_failed() {
    let (tx, mut rx) = mpsc::channel(64);
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let thread = ThreadBuilder::new(2)
        .plan(Arc::new(MockPlan::new("mock").with_fail_setup()))
        .activity_tx(tx)
        .stop_condition(StopCondition::ActionCount(3))
        .build()
        .expect("build thread");

    thread.run(shutdown_rx).await;
    drop(shutdown_tx);

    let events = collect(&mut rx).await;
    let statuses: Vec<_> = events.iter().map(|a| a.status).collect();
    assert_eq!(
        statuses,
        vec![ActivityStatus::Launching, ActivityStatus::LaunchFailed]
    );
}

#[tokio::test]
async fn test_thread_action_errors_keep_running() {
    let (tx, mut rx) = mpsc::channel(64);
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    // Every second action fails; four attempts give two of each.
    let thread = ThreadBuilder::new(4)
        .plan(Arc::new(MockPlan::new("mock").with_fail_action_every(2)))
        .activity_tx(tx)
        .stop_condition(StopCondition::ActionCount(4))
        .build()
        .expect("build thread");

    thread.run(shutdown_rx).await;
    drop(shutdown_tx);

    let events = collect(&mut rx).await;
    let statuses: Vec<_> = events.iter().map(|a| a.status).collect();
    assert_eq!(
        statuses,
        vec![
            ActivityStatus::Launching,
            ActivityStatus::Active,
            ActivityStatus::Action,
            ActivityStatus::Error,
            ActivityStatus::Action,
            ActivityStatus::Error,
            ActivityStatus::Inactive,
        ]
    );

    let error = events
        .iter()
        .find(|a| a.status == ActivityStatus::Error)
        .expect("error event");
    assert_eq!(error.message, "mock");
    assert!(error
        .error
        .as_deref()
        .expect("error detail")
        .contains("simulated action failure"));
}

#[tokio::test]
async fn test_thread_stops_on_shutdown() {
    let (tx, mut rx) = mpsc::channel(1024);
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let thread = ThreadBuilder::new(0)
        .plan(Arc::new(
            MockPlan::new("mock").with_action_delay(Duration::from_millis(10)),
        ))
        .activity_tx(tx)
        .stop_condition(StopCondition::Indefinite)
        .build()
        .expect("build thread");

    let handle = tokio::spawn(thread.run(shutdown_rx));

    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown_tx.send(()).expect("thread listening");
    handle.await.expect("thread task");

    let events = collect(&mut rx).await;
    assert_eq!(events.first().map(|a| a.status), Some(ActivityStatus::Launching));
    assert_eq!(events.get(1).map(|a| a.status), Some(ActivityStatus::Active));
    assert_eq!(events.last().map(|a| a.status), Some(ActivityStatus::Inactive));
    assert!(events
        .iter()
        .any(|a| a.status == ActivityStatus::Action));
}

#[tokio::test]
async fn test_thread_respects_duration_stop() {
    let (tx, mut rx) = mpsc::channel(1024);
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let thread = ThreadBuilder::new(1)
        .plan(Arc::new(
            MockPlan::new("mock").with_action_delay(Duration::from_millis(5)),
        ))
        .activity_tx(tx)
        .stop_condition(StopCondition::Duration(Duration::from_millis(50)))
        .build()
        .expect("build thread");

    thread.run(shutdown_rx).await;
    drop(shutdown_tx);

    let events = collect(&mut rx).await;
    assert_eq!(events.last().map(|a| a.status), Some(ActivityStatus::Inactive));
    assert!(events.iter().any(|a| a.status == ActivityStatus::Action));
}

#[tokio::test]
async fn test_thread_exits_quietly_when_stream_closed() {
    let (tx, rx) = mpsc::channel(64);
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    drop(rx);

    let thread = ThreadBuilder::new(5)
        .plan(Arc::new(MockPlan::new("mock")))
        .activity_tx(tx)
        .stop_condition(StopCondition::ActionCount(3))
        .build()
        .expect("build thread");

    // No receiver: the first send fails and the thread just returns.
    thread.run(shutdown_rx).await;
    drop(shutdown_tx);
}
