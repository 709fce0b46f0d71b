//! Request dispatch and response normalization.
//!
//! [`RequestDispatcher`] turns one request payload into one HTTP call and
//! folds the outcome into either the parsed JSON body or a
//! [`ClientError`]. The body is parsed as JSON regardless of status so that
//! the server's `error` field can be surfaced on failure.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, OperationFailure, Result};
use crate::transport::{Transport, TransportResponse};

/// A vault server endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Store a secret.
    Put,
    /// Fetch a secret.
    Get,
    /// Enumerate secret paths under a prefix.
    List,
    /// Remove a secret.
    Delete,
    /// Server liveness probe.
    Health,
}

impl Endpoint {
    /// The path appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Put => "/put",
            Self::Get => "/get",
            Self::List => "/list",
            Self::Delete => "/delete",
            Self::Health => "/health",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Sends composed requests to the vault server.
#[derive(Clone)]
pub struct RequestDispatcher {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl RequestDispatcher {
    /// Create a dispatcher targeting `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint.
    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// POST `request` as JSON to `endpoint` and return the parsed body.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Operation`] on a non-success status.
    /// - [`ClientError::Network`] if the call cannot be completed.
    /// - [`ClientError::MalformedResponse`] if a success body is not JSON.
    pub async fn dispatch<T>(&self, endpoint: Endpoint, request: &T) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_string(request)?;
        let url = self.url_for(endpoint);

        tracing::debug!(endpoint = %endpoint, "dispatching vault request");
        let response = self.transport.post_json(&url, body).await?;
        Self::normalize(endpoint, response)
    }

    /// GET `endpoint` and return the parsed body.
    pub async fn fetch(&self, endpoint: Endpoint) -> Result<Value> {
        let url = self.url_for(endpoint);

        tracing::debug!(endpoint = %endpoint, "fetching from vault");
        let response = self.transport.get(&url).await?;
        Self::normalize(endpoint, response)
    }

    fn normalize(endpoint: Endpoint, response: TransportResponse) -> Result<Value> {
        let parsed = serde_json::from_str::<Value>(&response.body);

        if !response.is_success() {
            let failure = OperationFailure::from_body(response.status, parsed.as_ref().ok());
            tracing::warn!(
                endpoint = %endpoint,
                status = response.status,
                message = %failure.message,
                "vault request rejected"
            );
            return Err(failure.into());
        }

        tracing::debug!(endpoint = %endpoint, status = response.status, "vault request succeeded");
        parsed.map_err(|e| ClientError::MalformedResponse {
            endpoint: endpoint.path(),
            reason: format!("body is not JSON: {e}"),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
