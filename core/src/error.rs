//! Error types for stampede-core

use thiserror::Error;

use crate::traits::PlanError;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Global setup failed; the run was aborted before any thread launched
    #[error("global setup failed: {0}")]
    Setup(PlanError),

    /// An event arrived that violates the activity protocol
    ///
    /// Continuing past one of these would silently desynchronize the
    /// counters from reality, so the run is aborted instead.
    #[error("activity protocol violation: {0}")]
    Protocol(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Protocol violation with the given description
    pub fn protocol(msg: impl Into<String>) -> Self {
        Error::Protocol(msg.into())
    }

    /// Configuration error for a missing builder field
    pub fn missing_config(field: &str) -> Self {
        Error::Config(format!("missing required field: {field}"))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
