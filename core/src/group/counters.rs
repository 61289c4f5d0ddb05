//! Live group counters and the error log

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// Live aggregate state for one run
///
/// Written exclusively by the group's aggregation loop; any task holding
/// an `Arc<GroupCounters>` may read concurrently. The group tracks
/// counts, not per-thread identities; thread ids appear only inside
/// error log entries.
#[derive(Debug, Default)]
pub struct GroupCounters {
    total: AtomicUsize,
    launching: AtomicUsize,
    active: AtomicUsize,
    actions: AtomicUsize,
    errors: RwLock<Vec<String>>,
}

impl GroupCounters {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Configured thread count for the current run
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Acquire)
    }

    /// Threads that signaled launching but are not yet active or failed
    pub fn launching(&self) -> usize {
        self.launching.load(Ordering::Acquire)
    }

    /// Threads currently executing their main work
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Discrete work actions performed across all threads
    pub fn actions(&self) -> usize {
        self.actions.load(Ordering::Acquire)
    }

    /// Number of logged errors
    pub fn error_count(&self) -> usize {
        self.errors_read().len()
    }

    /// Copy of the error log entries, in event arrival order
    pub fn errors(&self) -> Vec<String> {
        self.errors_read().clone()
    }

    /// Point-in-time copy of every counter and the error log
    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            total: self.total(),
            launching: self.launching(),
            active: self.active(),
            actions: self.actions(),
            errors: self.errors(),
        }
    }

    pub(crate) fn reset(&self, total: usize) {
        self.total.store(total, Ordering::Release);
        self.launching.store(0, Ordering::Release);
        self.active.store(0, Ordering::Release);
        self.actions.store(0, Ordering::Release);
        self.errors_write().clear();
    }

    pub(crate) fn increment_launching(&self) {
        self.launching.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns `false` when the counter is already zero.
    pub(crate) fn decrement_launching(&self) -> bool {
        Self::checked_decrement(&self.launching)
    }

    pub(crate) fn increment_active(&self) {
        self.active.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns `false` when the counter is already zero.
    pub(crate) fn decrement_active(&self) -> bool {
        Self::checked_decrement(&self.active)
    }

    pub(crate) fn increment_actions(&self) {
        self.actions.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn push_error(&self, entry: String) {
        self.errors_write().push(entry);
    }

    // Single-writer discipline makes load-then-store race-free here.
    fn checked_decrement(counter: &AtomicUsize) -> bool {
        let current = counter.load(Ordering::Acquire);
        if current == 0 {
            return false;
        }
        counter.store(current - 1, Ordering::Release);
        true
    }

    fn errors_read(&self) -> std::sync::RwLockReadGuard<'_, Vec<String>> {
        self.errors.read().unwrap_or_else(|e| e.into_inner())
    }

    fn errors_write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<String>> {
        self.errors.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Plain-data snapshot of [`GroupCounters`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupSnapshot {
    /// Configured thread count
    pub total: usize,

    /// Threads that signaled launching but are not yet active or failed
    pub launching: usize,

    /// Threads currently executing their main work
    pub active: usize,

    /// Discrete work actions performed across all threads
    pub actions: usize,

    /// Error log entries in event arrival order
    pub errors: Vec<String>,
}
