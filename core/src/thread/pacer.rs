//! Pacing between thread actions

use governor::{clock::DefaultClock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use std::num::NonZeroU32;

/// Action pacer using a token bucket via the governor crate
///
/// Limits how fast one thread performs actions. Share a single instance
/// via Arc to pace a whole group globally instead.
pub struct ActionPacer {
    limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    pacing: Option<f64>,
}

impl ActionPacer {
    /// Create a new pacer
    ///
    /// `pacing` is the allowed actions per second; `None` disables
    /// pacing. Sub-1 values are rounded up to 1 action per second.
    pub fn new(pacing: Option<f64>) -> Self {
        let limiter = pacing.and_then(|aps| {
            if aps <= 0.0 {
                return None;
            }
            let aps_int = (aps.ceil() as u32).max(1);
            let quota = Quota::per_second(NonZeroU32::new(aps_int)?);
            Some(RateLimiter::direct(quota))
        });

        Self { limiter, pacing }
    }

    /// Create a pacer that never waits
    pub fn unpaced() -> Self {
        Self::new(None)
    }

    /// Wait until the next action is allowed
    ///
    /// Returns immediately if pacing is disabled.
    pub async fn wait(&self) {
        if let Some(ref limiter) = self.limiter {
            limiter.until_ready().await;
        }
    }

    /// Check if pacing is enabled
    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Get the configured pacing (actions per second)
    pub fn pacing(&self) -> Option<f64> {
        self.pacing
    }
}

impl Default for ActionPacer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for ActionPacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionPacer")
            .field("pacing", &self.pacing)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
