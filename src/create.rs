//! Create session: fill a form, submit it, start fresh on success.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::busy::BusyFlag;
use crate::gateway::{GatewayError, TaskGateway};
use crate::model::TaskForm;
use crate::notify::Notifier;

const CREATE_FAILED: &str = "Failed to create task";

/// State for composing and submitting a new task.
#[derive(Debug)]
pub struct CreateSession<G, N> {
    gateway: Arc<G>,
    notifier: Arc<N>,
    form: Mutex<TaskForm>,
    submitting: BusyFlag,
}

impl<G: TaskGateway, N: Notifier> CreateSession<G, N> {
    /// Create a session with a blank form.
    pub fn new(gateway: Arc<G>, notifier: Arc<N>) -> Self {
        Self {
            gateway,
            notifier,
            form: Mutex::new(TaskForm::default()),
            submitting: BusyFlag::new(),
        }
    }

    /// Validate the form and create the task on the server.
    ///
    /// A submit already in flight makes this a no-op. On success the
    /// form resets to blank for the next task; on failure it keeps its
    /// contents so nothing typed is lost. A server rejection that
    /// carries its own message is surfaced verbatim.
    pub async fn submit(&self) {
        let Some(_guard) = self.submitting.try_acquire() else {
            debug!("submit already in flight, skipping");
            return;
        };
        let validated = self.form.lock().validate();
        let payload = match validated {
            Ok(payload) => payload,
            Err(e) => {
                debug!(error = %e, "create form rejected");
                self.notifier.notify_failure(&e.to_string());
                return;
            }
        };
        match self.gateway.create(&payload).await {
            Ok(task) => {
                *self.form.lock() = TaskForm::default();
                self.notifier
                    .notify_success(&format!("Task \"{}\" created successfully", task.name));
            }
            Err(GatewayError::Server {
                message: Some(message),
                ..
            }) => {
                self.notifier.notify_failure(&message);
            }
            Err(e) => {
                warn!(error = %e, "task create failed");
                self.notifier.notify_failure(CREATE_FAILED);
            }
        }
    }

    /// Snapshot of the form contents.
    pub fn form(&self) -> TaskForm {
        self.form.lock().clone()
    }

    /// Replace the form contents.
    pub fn set_form(&self, form: TaskForm) {
        *self.form.lock() = form;
    }

    /// Whether a submit is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.is_set()
    }
}
