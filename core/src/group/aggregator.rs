//! Activity aggregation: the group lifecycle state machine

use crate::activity::{Activity, ActivityStatus};
use crate::error::{Error, Result};

use super::counters::GroupCounters;

/// Apply one activity to the group counters
///
/// Dispatches purely on the activity status:
///
/// - `Launching`: `launching += 1`
/// - `LaunchFailed`: `launching -= 1`
/// - `Active`: `launching -= 1`, `active += 1`
/// - `Inactive`: `active -= 1`
/// - `Action`: `actions += 1`
/// - `Error`: append a formatted entry to the error log
///
/// The single aggregation loop applies exactly one event at a time, in
/// arrival order, so each effect is atomic from the group's point of view.
///
/// # Errors
///
/// Returns [`Error::Protocol`] when the event sequence is out of
/// contract: any transition that would take `launching` or `active`
/// below zero, such as an `Inactive` without a prior `Active` or a
/// duplicate `LaunchFailed`. Callers must abort the run; continuing
/// would silently desynchronize the counters from reality.
pub(crate) fn apply(counters: &GroupCounters, activity: &Activity) -> Result<()> {
    match activity.status {
        ActivityStatus::Launching => {
            counters.increment_launching();
        }
        ActivityStatus::LaunchFailed => {
            // Counter-only by contract: launch failures are not logged.
            if !counters.decrement_launching() {
                return Err(underflow("LaunchFailed", "launching", activity));
            }
        }
        ActivityStatus::Active => {
            if !counters.decrement_launching() {
                return Err(underflow("Active", "launching", activity));
            }
            counters.increment_active();
        }
        ActivityStatus::Inactive => {
            if !counters.decrement_active() {
                return Err(underflow("Inactive", "active", activity));
            }
        }
        ActivityStatus::Action => {
            counters.increment_actions();
        }
        ActivityStatus::Error => {
            let detail = activity.error.as_deref().unwrap_or("unknown error");
            counters.push_error(format!(
                "Thread #{} - {} - {}",
                activity.id, activity.message, detail
            ));
        }
    }

    Ok(())
}

fn underflow(status: &str, counter: &str, activity: &Activity) -> Error {
    Error::protocol(format!(
        "{status} from thread #{} would take {counter} below zero",
        activity.id
    ))
}
