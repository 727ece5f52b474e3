//! Remote task gateway abstraction.
//!
//! Defines the [`TaskGateway`] trait that all gateway implementations must
//! satisfy. Concrete implementations include:
//! - [`http::HttpGateway`] — reqwest client against the remote REST store
//! - [`memory::MemoryGateway`] — in-process store for tests and offline use

pub mod http;
pub mod memory;

use crate::model::{Task, TaskId, TaskPayload};

/// Errors that can occur during gateway operations.
///
/// Validation failures are not represented here: forms are validated in
/// [`crate::model`] before a gateway method ever runs.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No usable response: connect failure, timeout, or a body that
    /// could not be decoded.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-success status other than 404.
    #[error("server rejected the request (status {status})")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Message from the response body's `error` field, when present.
        message: Option<String>,
    },

    /// The task does not exist on the server (404).
    #[error("task not found")]
    NotFound,
}

impl GatewayError {
    /// Wrap an underlying transport or decode error as
    /// [`GatewayError::Network`].
    pub fn network(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Box::new(source))
    }
}

/// Async gateway trait for task CRUD against the remote store.
///
/// # Invariant
///
/// Payloads passed to [`create`](TaskGateway::create) and
/// [`update`](TaskGateway::update) MUST come from
/// [`TaskForm::validate`](crate::model::TaskForm::validate). The gateway
/// never re-validates; it carries what it is given.
pub trait TaskGateway: Send + Sync {
    /// Fetch the full task list, in server order.
    fn list_all(&self)
    -> impl std::future::Future<Output = Result<Vec<Task>, GatewayError>> + Send;

    /// Create a task, returning the stored record with its
    /// server-assigned id and creation timestamp.
    fn create(
        &self,
        payload: &TaskPayload,
    ) -> impl std::future::Future<Output = Result<Task, GatewayError>> + Send;

    /// Fetch a single task by id.
    fn fetch_one(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<Task, GatewayError>> + Send;

    /// Replace a task's user-editable fields wholesale.
    ///
    /// Returns the updated record when the server includes one in the
    /// response; some stores answer with an empty body instead.
    fn update(
        &self,
        id: &TaskId,
        payload: &TaskPayload,
    ) -> impl std::future::Future<Output = Result<Option<Task>, GatewayError>> + Send;

    /// Delete a task by id.
    ///
    /// Not idempotent remotely: deleting a task the server no longer has
    /// yields [`GatewayError::NotFound`].
    fn delete(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;
}
