//! Edit session: fetch a task for editing, then commit the replacement.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::busy::BusyFlag;
use crate::gateway::{GatewayError, TaskGateway};
use crate::model::{Task, TaskForm, TaskId};
use crate::notify::Notifier;
use crate::store::TaskStore;

const FETCH_EDIT_FAILED: &str = "Failed to fetch task for editing.";
const UPDATE_OK: &str = "Task updated successfully!";
const UPDATE_GONE: &str = "Task no longer exists";
const UPDATE_FAILED: &str = "Failed to update task.";

/// State for editing one task at a time.
///
/// An edit starts by fetching the task's current server state so the
/// form is prefilled from the store of record rather than the local
/// snapshot. Committing replaces the task's editable fields wholesale
/// and closes the session.
#[derive(Debug)]
pub struct EditSession<G, N> {
    gateway: Arc<G>,
    notifier: Arc<N>,
    store: Arc<TaskStore<G, N>>,
    slot: Mutex<Option<Task>>,
    fetching: BusyFlag,
    saving: BusyFlag,
}

impl<G: TaskGateway, N: Notifier> EditSession<G, N> {
    /// Create a session with no task under edit.
    pub fn new(gateway: Arc<G>, notifier: Arc<N>, store: Arc<TaskStore<G, N>>) -> Self {
        Self {
            gateway,
            notifier,
            store,
            slot: Mutex::new(None),
            fetching: BusyFlag::new(),
            saving: BusyFlag::new(),
        }
    }

    /// Fetch a task's current state and open it for editing.
    ///
    /// A fetch already in flight makes this a no-op, so the first
    /// requested task keeps the slot. On failure the slot is left as it
    /// was and the user is notified.
    pub async fn start_edit(&self, id: &TaskId) {
        let Some(_guard) = self.fetching.try_acquire() else {
            debug!(id = %id, "edit fetch already in flight, skipping");
            return;
        };
        match self.gateway.fetch_one(id).await {
            Ok(task) => {
                *self.slot.lock() = Some(task);
            }
            Err(e) => {
                warn!(id = %id, error = %e, "edit fetch failed");
                self.notifier.notify_failure(FETCH_EDIT_FAILED);
            }
        }
    }

    /// Close the session without saving. Purely local.
    pub fn cancel_edit(&self) {
        *self.slot.lock() = None;
    }

    /// Validate the form and replace the task's fields on the server.
    ///
    /// On success the session closes and the shared list is refreshed. A
    /// task deleted underneath the edit also closes the session; its
    /// fields are gone either way. Other failures keep the session open
    /// so edits are not lost.
    pub async fn commit_edit(&self, id: &TaskId, form: &TaskForm) {
        let Some(_guard) = self.saving.try_acquire() else {
            debug!(id = %id, "save already in flight, skipping");
            return;
        };
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(e) => {
                debug!(id = %id, error = %e, "edit form rejected");
                self.notifier.notify_failure(&e.to_string());
                return;
            }
        };
        match self.gateway.update(id, &payload).await {
            Ok(_) => {
                *self.slot.lock() = None;
                self.notifier.notify_success(UPDATE_OK);
                self.store.refresh().await;
            }
            Err(GatewayError::NotFound) => {
                *self.slot.lock() = None;
                self.notifier.notify_failure(UPDATE_GONE);
                self.store.refresh().await;
            }
            Err(e) => {
                warn!(id = %id, error = %e, "task update failed");
                self.notifier.notify_failure(UPDATE_FAILED);
            }
        }
    }

    /// The task currently under edit, if any.
    pub fn editing(&self) -> Option<Task> {
        self.slot.lock().clone()
    }

    /// Form prefilled from the task under edit, if any.
    pub fn form(&self) -> Option<TaskForm> {
        self.slot.lock().as_ref().map(TaskForm::from_task)
    }

    /// Whether the initial fetch is in flight.
    pub fn is_fetching(&self) -> bool {
        self.fetching.is_set()
    }

    /// Whether a save is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving.is_set()
    }
}
