//! HTTP gateway backed by the remote REST task store.

use std::time::Duration;

use serde::Deserialize;

use crate::gateway::{GatewayError, TaskGateway};
use crate::model::{Task, TaskId, TaskPayload};

/// Error body shape the server uses for non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Gateway that talks to the remote task store over HTTP.
///
/// Routes, relative to the base URL:
/// - `GET /` — list all tasks
/// - `POST /create` — create a task
/// - `GET /view/{id}` — fetch one task
/// - `PUT /update/{id}` — replace a task's editable fields
/// - `DELETE /delete/{id}` — delete a task
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway for the given base URL with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the underlying client cannot
    /// be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GatewayError::network)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Map a non-success response to a gateway error, consuming the body.
    async fn error_for(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return GatewayError::NotFound;
        }
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .ok(),
            Err(_) => None,
        };
        GatewayError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

impl TaskGateway for HttpGateway {
    async fn list_all(&self) -> Result<Vec<Task>, GatewayError> {
        let url = format!("{}/", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(GatewayError::network)?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        response.json().await.map_err(GatewayError::network)
    }

    async fn create(&self, payload: &TaskPayload) -> Result<Task, GatewayError> {
        let url = format!("{}/create", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(GatewayError::network)?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        response.json().await.map_err(GatewayError::network)
    }

    async fn fetch_one(&self, id: &TaskId) -> Result<Task, GatewayError> {
        let url = format!("{}/view/{}", self.base_url, id.as_str());
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(GatewayError::network)?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        response.json().await.map_err(GatewayError::network)
    }

    async fn update(
        &self,
        id: &TaskId,
        payload: &TaskPayload,
    ) -> Result<Option<Task>, GatewayError> {
        let url = format!("{}/update/{}", self.base_url, id.as_str());
        let response = self
            .client
            .put(&url)
            .json(payload)
            .send()
            .await
            .map_err(GatewayError::network)?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        // Some deployments answer an update with the stored record, others
        // with an empty body. Treat both as success.
        let body = response.bytes().await.map_err(GatewayError::network)?;
        if body.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(GatewayError::network)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), GatewayError> {
        let url = format!("{}/delete/{}", self.base_url, id.as_str());
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(GatewayError::network)?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        Ok(())
    }
}
