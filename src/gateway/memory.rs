//! In-process gateway for tests and offline use.
//!
//! Behaves like the remote store (server-assigned ids, 404 on missing
//! tasks) but adds failure injection, call counters, and a latch that
//! parks the next call until released, so concurrent flows can be driven
//! deterministically.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::gateway::{GatewayError, TaskGateway};
use crate::model::{Task, TaskId, TaskPayload};

/// A failure the gateway should return instead of doing work.
#[derive(Debug, Clone)]
pub enum InjectedFailure {
    /// Simulate an unreachable server.
    Network,
    /// Simulate a server rejection with the given status and message.
    Server {
        /// HTTP-like status code to report.
        status: u16,
        /// Optional server-side message.
        message: Option<String>,
    },
}

impl InjectedFailure {
    fn into_error(self) -> GatewayError {
        match self {
            Self::Network => GatewayError::network(std::io::Error::other(
                "injected network failure",
            )),
            Self::Server { status, message } => GatewayError::Server { status, message },
        }
    }
}

/// Gateway holding its tasks in process memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    tasks: Mutex<Vec<Task>>,
    failures: Mutex<VecDeque<InjectedFailure>>,
    hold: Mutex<Option<Arc<Notify>>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MemoryGateway {
    /// Create an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway pre-seeded with tasks.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Self::default()
        }
    }

    /// Queue a failure for the next gateway call.
    ///
    /// Queued failures are consumed in order, one per call, before any
    /// work happens.
    pub fn fail_next(&self, failure: InjectedFailure) {
        self.failures.lock().push_back(failure);
    }

    /// Park the next gateway call until the returned handle is notified.
    ///
    /// The call increments its counter first, then waits, so a test can
    /// observe the call in flight before releasing it.
    pub fn hold_next_call(&self) -> Arc<Notify> {
        let latch = Arc::new(Notify::new());
        *self.hold.lock() = Some(Arc::clone(&latch));
        latch
    }

    /// Snapshot of the stored tasks.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().clone()
    }

    /// Remove a task directly, bypassing counters and failure injection.
    ///
    /// Models another client deleting the task behind this one's back.
    pub fn remove_direct(&self, id: &TaskId) {
        self.tasks.lock().retain(|t| t.id != *id);
    }

    /// Number of `list_all` calls observed.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::Acquire)
    }

    /// Number of `create` calls observed.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::Acquire)
    }

    /// Number of `fetch_one` calls observed.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::Acquire)
    }

    /// Number of `update` calls observed.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::Acquire)
    }

    /// Number of `delete` calls observed.
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::Acquire)
    }

    async fn gate(&self) {
        let latch = self.hold.lock().take();
        if let Some(latch) = latch {
            latch.notified().await;
        }
    }

    fn take_failure(&self) -> Option<GatewayError> {
        self.failures.lock().pop_front().map(InjectedFailure::into_error)
    }

    fn materialize(payload: &TaskPayload) -> Task {
        Task {
            id: TaskId::new(Uuid::now_v7().to_string()),
            name: payload.name.clone(),
            description: payload.description.clone(),
            status: payload.status,
            deadline: payload.deadline,
            created_at: Utc::now(),
        }
    }
}

impl TaskGateway for MemoryGateway {
    async fn list_all(&self) -> Result<Vec<Task>, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::AcqRel);
        self.gate().await;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.tasks.lock().clone())
    }

    async fn create(&self, payload: &TaskPayload) -> Result<Task, GatewayError> {
        self.create_calls.fetch_add(1, Ordering::AcqRel);
        self.gate().await;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let task = Self::materialize(payload);
        self.tasks.lock().push(task.clone());
        Ok(task)
    }

    async fn fetch_one(&self, id: &TaskId) -> Result<Task, GatewayError> {
        self.fetch_calls.fetch_add(1, Ordering::AcqRel);
        self.gate().await;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.tasks
            .lock()
            .iter()
            .find(|t| t.id == *id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn update(
        &self,
        id: &TaskId,
        payload: &TaskPayload,
    ) -> Result<Option<Task>, GatewayError> {
        self.update_calls.fetch_add(1, Ordering::AcqRel);
        self.gate().await;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut tasks = self.tasks.lock();
        let Some(task) = tasks.iter_mut().find(|t| t.id == *id) else {
            return Err(GatewayError::NotFound);
        };
        task.name = payload.name.clone();
        task.description = payload.description.clone();
        task.status = payload.status;
        task.deadline = payload.deadline;
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: &TaskId) -> Result<(), GatewayError> {
        self.delete_calls.fetch_add(1, Ordering::AcqRel);
        self.gate().await;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut tasks = self.tasks.lock();
        let before = tasks.len();
        tasks.retain(|t| t.id != *id);
        if tasks.len() == before {
            return Err(GatewayError::NotFound);
        }
        Ok(())
    }
}
