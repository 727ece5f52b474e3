//! Shared task list state: refresh and delete flows.
//!
//! The store owns the local snapshot of the remote task list. Refreshes
//! replace the snapshot wholesale; deletes remove the task remotely and
//! then prune it locally without a follow-up fetch.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::busy::{BusyFlag, BusyTracker};
use crate::gateway::{GatewayError, TaskGateway};
use crate::model::{Task, TaskId};
use crate::notify::Notifier;

const FETCH_FAILED: &str = "Failed to fetch tasks.";
const DELETE_OK: &str = "Task deleted";
const DELETE_ALREADY_GONE: &str = "Task was already removed";
const DELETE_FAILED: &str = "Failed to delete task.";

/// Local snapshot of the remote task list plus its in-flight state.
#[derive(Debug)]
pub struct TaskStore<G, N> {
    gateway: Arc<G>,
    notifier: Arc<N>,
    tasks: Mutex<Vec<Task>>,
    loading: BusyFlag,
    deleting: BusyTracker,
}

impl<G: TaskGateway, N: Notifier> TaskStore<G, N> {
    /// Create a store with an empty snapshot.
    pub fn new(gateway: Arc<G>, notifier: Arc<N>) -> Self {
        Self {
            gateway,
            notifier,
            tasks: Mutex::new(Vec::new()),
            loading: BusyFlag::new(),
            deleting: BusyTracker::new(),
        }
    }

    /// Replace the snapshot with the server's current list.
    ///
    /// A refresh already in flight makes this a no-op. On failure the
    /// previous snapshot is kept and the user is notified.
    pub async fn refresh(&self) {
        let Some(_guard) = self.loading.try_acquire() else {
            debug!("refresh already in flight, skipping");
            return;
        };
        match self.gateway.list_all().await {
            Ok(tasks) => {
                *self.tasks.lock() = tasks;
            }
            Err(e) => {
                warn!(error = %e, "task list refresh failed");
                self.notifier.notify_failure(FETCH_FAILED);
            }
        }
    }

    /// Delete a task remotely, then prune it from the snapshot.
    ///
    /// A second delete for the same id while one is in flight is
    /// ignored; deletes for other ids proceed independently. A task the
    /// server no longer has is still pruned locally, with a distinct
    /// notice, since the intended end state already holds.
    pub async fn delete(&self, id: &TaskId) {
        let Some(_guard) = self.deleting.begin(id) else {
            debug!(id = %id, "delete already in flight, skipping");
            return;
        };
        match self.gateway.delete(id).await {
            Ok(()) => {
                self.remove_local(id);
                self.notifier.notify_success(DELETE_OK);
            }
            Err(GatewayError::NotFound) => {
                self.remove_local(id);
                self.notifier.notify_success(DELETE_ALREADY_GONE);
            }
            Err(e) => {
                warn!(id = %id, error = %e, "task delete failed");
                self.notifier.notify_failure(DELETE_FAILED);
            }
        }
    }

    /// Prune a task from the snapshot without contacting the server.
    ///
    /// The only mutation besides a full refresh; used after a confirmed
    /// deletion to skip the refetch round trip.
    pub fn remove_local(&self, id: &TaskId) {
        self.tasks.lock().retain(|t| t.id != *id);
    }

    /// Snapshot of the current task list.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().clone()
    }

    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    /// Whether a delete for this id is in flight.
    pub fn is_deleting(&self, id: &TaskId) -> bool {
        self.deleting.is_busy(id)
    }
}
