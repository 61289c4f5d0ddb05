//! Channel configuration for group communication

/// Channel buffer configuration for the activity stream
///
/// The stream is bounded: when the aggregation loop falls behind, threads
/// block on send rather than events being dropped.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Activity channel buffer size (threads -> aggregator)
    pub activity_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            activity_buffer: 40_000,
        }
    }
}

impl ChannelConfig {
    /// Create a new channel config with a custom activity buffer size
    pub fn with_activity_buffer(mut self, size: usize) -> Self {
        self.activity_buffer = size;
        self
    }
}
