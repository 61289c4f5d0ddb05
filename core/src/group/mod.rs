//! Group coordination: ramped launch and event aggregation
//!
//! The Group is the control core of a run:
//! - Running the plan's one-time global setup before anything launches
//! - Launching threads staggered across the ramp window
//! - Consuming the activity stream as its single reader, folding every
//!   event into live counters and an error log
//! - Winding the run down via a broadcast shutdown signal
//!
//! # Example
//!
//! ```ignore
//! use stampede_core::{GroupBuilder, StopCondition};
//!
//! let group = GroupBuilder::new()
//!     .factory(factory)
//!     .threads(50)
//!     .ramp(Duration::from_secs(30))
//!     .stop_condition(StopCondition::Duration(Duration::from_secs(300)))
//!     .build()?;
//!
//! group.kickstart().await?;
//! ```

mod aggregator;
mod builder;
mod counters;
mod executor;

pub use builder::GroupBuilder;
pub use counters::{GroupCounters, GroupSnapshot};
pub use executor::Group;

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::traits::TestPlanFactory;

/// Launch a group and block for the life of the run
///
/// Convenience entry point preserving the classic four-argument shape: a
/// plan factory, the thread count, the identity offset, and the ramp
/// window. Threads run until externally shut down; build a [`Group`]
/// directly for stop conditions, pacing, and shutdown control.
pub async fn kickstart(
    factory: Arc<dyn TestPlanFactory>,
    threads: usize,
    offset: usize,
    ramp: Duration,
) -> Result<()> {
    let group = GroupBuilder::new()
        .factory(factory)
        .threads(threads)
        .offset(offset)
        .ramp(ramp)
        .build()?;

    group.kickstart().await
}
