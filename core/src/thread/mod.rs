//! Thread module: the worker execution loop
//!
//! A thread is the unit that actually runs a test plan. Each thread is an
//! independent tokio task that reports its lifecycle to the group through
//! the shared activity stream:
//!
//! 1. `Launching` when scheduled
//! 2. `LaunchFailed` if per-thread setup fails, or `Active` once working
//! 3. `Action` per completed unit of work, `Error` per non-fatal failure
//! 4. `Inactive` when its stop condition or shutdown ends the run
//!
//! The group imposes no interface on a thread beyond "writes activities
//! to the given stream"; threads never touch group state directly.
//!
//! # Example
//!
//! ```ignore
//! use stampede_core::{StopCondition, ThreadBuilder};
//!
//! let thread = ThreadBuilder::new(0)
//!     .plan(plan)
//!     .activity_tx(tx)
//!     .stop_condition(StopCondition::ActionCount(100))
//!     .build()?;
//!
//! tokio::spawn(thread.run(shutdown_rx));
//! ```

mod builder;
mod executor;
mod pacer;

pub use builder::ThreadBuilder;
pub use executor::Thread;
pub use pacer::ActionPacer;

#[cfg(test)]
mod tests;
