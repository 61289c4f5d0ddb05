//! Builder pattern for Group construction

use std::sync::Arc;
use std::time::Duration;

use crate::channel::ChannelConfig;
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::traits::{StopCondition, TestPlanFactory};

use super::executor::Group;

/// Builder for creating a [`Group`] with validated configuration
///
/// # Example
///
/// ```ignore
/// let group = GroupBuilder::new()
///     .factory(factory)
///     .threads(50)
///     .offset(0)
///     .ramp(Duration::from_secs(30))
///     .pacing(Some(10.0))
///     .build()?;
/// ```
pub struct GroupBuilder {
    config: RunConfig,
    factory: Option<Arc<dyn TestPlanFactory>>,
    channel_config: ChannelConfig,
}

impl GroupBuilder {
    /// Create a new group builder with default configuration
    pub fn new() -> Self {
        Self {
            config: RunConfig::default(),
            factory: None,
            channel_config: ChannelConfig::default(),
        }
    }

    /// Set the full run configuration
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of threads to launch
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    /// Set the identity of the first thread
    pub fn offset(mut self, offset: usize) -> Self {
        self.config.offset = offset;
        self
    }

    /// Set the ramp-up window
    pub fn ramp(mut self, ramp: Duration) -> Self {
        self.config.ramp = ramp;
        self
    }

    /// Set the stop condition applied to every thread
    pub fn stop_condition(mut self, stop: StopCondition) -> Self {
        self.config.stop_condition = stop;
        self
    }

    /// Set the per-thread action pacing (actions per second)
    pub fn pacing(mut self, aps: Option<f64>) -> Self {
        self.config.pacing = aps;
        self
    }

    /// Set the test-plan factory
    pub fn factory(mut self, factory: Arc<dyn TestPlanFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Set the channel configuration
    pub fn channel_config(mut self, config: ChannelConfig) -> Self {
        self.channel_config = config;
        self
    }

    /// Build the group
    ///
    /// # Errors
    ///
    /// Returns an error if the factory is not set, or if configuration
    /// validation fails.
    pub fn build(self) -> Result<Group> {
        let factory = self
            .factory
            .ok_or_else(|| Error::missing_config("factory"))?;

        self.config
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Group::new(self.config, factory, self.channel_config))
    }
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
