//! Lifecycle activity events emitted by threads

use serde::{Deserialize, Serialize};

/// Lifecycle states a thread reports to its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// The thread has been scheduled and is initializing
    Launching,
    /// Initialization failed before the thread became active
    LaunchFailed,
    /// The thread finished initializing and began its main work
    Active,
    /// The thread stopped performing its main work
    Inactive,
    /// The thread performed one discrete unit of work
    Action,
    /// The thread hit a non-fatal problem
    Error,
}

/// An immutable event describing one lifecycle transition of a thread
///
/// Threads send one `Activity` per transition through the shared event
/// stream; the group's aggregation loop is the only consumer. Events are
/// unbounded over a run but bounded in flight by the stream's capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Identity of the emitting thread
    pub id: usize,

    /// The lifecycle transition being reported
    pub status: ActivityStatus,

    /// Free-form context, meaningful mainly for error events
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Underlying failure detail, present only for error events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Activity {
    fn new(id: usize, status: ActivityStatus) -> Self {
        Self {
            id,
            status,
            message: String::new(),
            error: None,
        }
    }

    /// The thread has been scheduled and is initializing
    pub fn launching(id: usize) -> Self {
        Self::new(id, ActivityStatus::Launching)
    }

    /// Initialization failed before the thread became active
    pub fn launch_failed(id: usize) -> Self {
        Self::new(id, ActivityStatus::LaunchFailed)
    }

    /// The thread finished initializing and began its main work
    pub fn active(id: usize) -> Self {
        Self::new(id, ActivityStatus::Active)
    }

    /// The thread stopped performing its main work
    pub fn inactive(id: usize) -> Self {
        Self::new(id, ActivityStatus::Inactive)
    }

    /// The thread performed one discrete unit of work
    pub fn action(id: usize) -> Self {
        Self::new(id, ActivityStatus::Action)
    }

    /// A non-fatal problem, with context and the underlying failure detail
    pub fn error(id: usize, message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self {
            id,
            status: ActivityStatus::Error,
            message: message.into(),
            error: Some(detail.to_string()),
        }
    }
}
