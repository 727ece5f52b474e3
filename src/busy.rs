//! Re-entrancy guards for in-flight operations.
//!
//! [`BusyFlag`] is a single-slot guard for operations that run at most
//! once at a time (list refresh, form submit). [`BusyTracker`] is its
//! per-id counterpart for operations that run concurrently across
//! different tasks but at most once per task (delete). Both hand out
//! RAII guards so the flag is released on every exit path, including
//! early returns.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::model::TaskId;

/// Single-slot re-entrancy flag.
///
/// Cloning shares the underlying flag.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    set: Arc<AtomicBool>,
}

impl BusyFlag {
    /// Create a cleared flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to set the flag, returning a guard that clears it on drop.
    ///
    /// Returns `None` if the flag is already set: the caller should treat
    /// the operation as a rejected re-entrant call.
    #[must_use]
    pub fn try_acquire(&self) -> Option<FlagGuard> {
        self.set
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| FlagGuard {
                set: Arc::clone(&self.set),
            })
    }

    /// Whether the flag is currently set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.set.load(Ordering::Acquire)
    }
}

/// Clears the owning [`BusyFlag`] when dropped.
#[derive(Debug)]
pub struct FlagGuard {
    set: Arc<AtomicBool>,
}

impl Drop for FlagGuard {
    fn drop(&mut self) {
        self.set.store(false, Ordering::Release);
    }
}

/// Tracks which task ids currently have a mutating operation in flight.
///
/// Each id moves Idle -> Busy on [`begin`](Self::begin) and back to Idle
/// when the returned guard drops; there is no other transition.
/// Different ids are fully independent. Cloning shares the underlying
/// set.
#[derive(Debug, Clone, Default)]
pub struct BusyTracker {
    ids: Arc<Mutex<HashSet<TaskId>>>,
}

impl BusyTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` busy, returning a guard that releases it on drop.
    ///
    /// Returns `None` if the id is already busy: the duplicate operation
    /// must be rejected before reaching the network.
    #[must_use]
    pub fn begin(&self, id: &TaskId) -> Option<BusyGuard> {
        if !self.ids.lock().insert(id.clone()) {
            return None;
        }
        Some(BusyGuard {
            ids: Arc::clone(&self.ids),
            id: id.clone(),
        })
    }

    /// Whether `id` currently has an operation in flight.
    #[must_use]
    pub fn is_busy(&self, id: &TaskId) -> bool {
        self.ids.lock().contains(id)
    }
}

/// Releases a busy id when dropped.
#[derive(Debug)]
pub struct BusyGuard {
    ids: Arc<Mutex<HashSet<TaskId>>>,
    id: TaskId,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.ids.lock().remove(&self.id);
    }
}
