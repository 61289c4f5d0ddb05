//! Run configuration types

use crate::traits::StopCondition;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Group run configuration
///
/// Defines how a run should ramp and how each thread behaves once
/// launched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of threads to launch
    pub threads: usize,

    /// Identity of the first thread; ids run `offset .. offset + threads`
    pub offset: usize,

    /// Window over which thread launches are spread evenly
    pub ramp: Duration,

    /// Stop condition applied to every thread
    pub stop_condition: StopCondition,

    /// Optional per-thread action pacing (actions per second)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pacing: Option<f64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            offset: 0,
            ramp: Duration::ZERO,
            stop_condition: StopCondition::default(),
            pacing: None,
        }
    }
}

impl RunConfig {
    /// Create a new config launching the given number of threads
    pub fn new(threads: usize) -> Self {
        Self {
            threads,
            ..Default::default()
        }
    }

    /// Set the first thread identity
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set the ramp-up window
    pub fn with_ramp(mut self, ramp: Duration) -> Self {
        self.ramp = ramp;
        self
    }

    /// Set the stop condition
    pub fn with_stop_condition(mut self, stop: StopCondition) -> Self {
        self.stop_condition = stop;
        self
    }

    /// Set the action pacing (actions per second)
    pub fn with_pacing(mut self, aps: f64) -> Self {
        self.pacing = Some(aps);
        self
    }

    /// Validate the configuration
    ///
    /// `threads == 0` is valid: the group launches nothing and returns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(aps) = self.pacing {
            if aps <= 0.0 {
                return Err(ConfigError::InvalidPacing("pacing must be positive".into()));
            }
        }

        if let StopCondition::ActionCount(n) = self.stop_condition {
            if n == 0 {
                return Err(ConfigError::InvalidStopCondition(
                    "action count must be at least 1".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid pacing value
    #[error("Invalid pacing: {0}")]
    InvalidPacing(String),

    /// Invalid stop condition
    #[error("Invalid stop condition: {0}")]
    InvalidStopCondition(String),
}
