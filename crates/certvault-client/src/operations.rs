//! Vault operations.
//!
//! [`VaultClient`] exposes one method per server operation. Each method
//! builds a fresh [`CredentialEnvelope`], merges it with the operation's own
//! fields, dispatches the request and decodes the typed result. There is no
//! state carried between calls.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::dispatcher::{Endpoint, RequestDispatcher};
use crate::envelope::{CredentialEnvelope, CredentialEnvelopeBuilder, CredentialInputs};
use crate::error::{ClientError, Result};
use crate::reader::{FileTextReader, TextSource};
use crate::transport::{HttpTransport, Transport};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct PutRequest<'a> {
    #[serde(flatten)]
    envelope: &'a CredentialEnvelope,
    path: &'a str,
    secret: &'a str,
}

#[derive(Debug, Serialize)]
struct PathRequest<'a> {
    #[serde(flatten)]
    envelope: &'a CredentialEnvelope,
    path: &'a str,
}

#[derive(Debug, Serialize)]
struct ListRequest<'a> {
    #[serde(flatten)]
    envelope: &'a CredentialEnvelope,
    prefix: &'a str,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    secret: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    items: Vec<String>,
}

/// Body of a successful `/health` probe.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    /// Server-reported status, e.g. `"up"`.
    pub status: String,
    /// Any other fields the server included.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Operation and result enums
// ---------------------------------------------------------------------------

/// An authenticated operation together with its own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultOperation {
    /// Store `secret` under `path`.
    Put { path: String, secret: String },
    /// Fetch the secret stored under `path`.
    Get { path: String },
    /// Enumerate paths starting with `prefix`.
    List { prefix: String },
    /// Remove the secret stored under `path`.
    Delete { path: String },
}

impl VaultOperation {
    /// The endpoint this operation is sent to.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Put { .. } => Endpoint::Put,
            Self::Get { .. } => Endpoint::Get,
            Self::List { .. } => Endpoint::List,
            Self::Delete { .. } => Endpoint::Delete,
        }
    }
}

/// Typed outcome of a [`VaultOperation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// The secret was stored.
    Stored,
    /// The fetched secret value.
    Secret(String),
    /// Matching paths, in the order the server returned them.
    Items(Vec<String>),
    /// The secret was removed.
    Deleted,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Authenticated client for the vault server.
///
/// Cheap to clone; clones share the underlying HTTP connection pool.
#[derive(Clone)]
pub struct VaultClient {
    envelopes: CredentialEnvelopeBuilder,
    dispatcher: RequestDispatcher,
}

impl VaultClient {
    /// Create a client that reads credential files from disk and talks HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the base URL is not an
    /// absolute http(s) URL or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_parts(&config, Arc::new(transport), Arc::new(FileTextReader::new()))
    }

    /// Create a client from explicit transport and file source.
    pub fn with_parts(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        source: Arc<dyn TextSource>,
    ) -> Result<Self> {
        config.validate()?;

        tracing::debug!(base_url = %config.effective_base_url(), "vault client configured");

        Ok(Self {
            envelopes: CredentialEnvelopeBuilder::new(source),
            dispatcher: RequestDispatcher::new(config.effective_base_url(), transport),
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.dispatcher.base_url()
    }

    /// Store `secret` under `path`.
    pub async fn put(&self, inputs: &CredentialInputs, path: &str, secret: &str) -> Result<()> {
        let envelope = self.envelopes.build(inputs).await?;
        let request = PutRequest {
            envelope: &envelope,
            path,
            secret,
        };
        self.dispatcher.dispatch(Endpoint::Put, &request).await?;
        Ok(())
    }

    /// Fetch the secret stored under `path`.
    ///
    /// A success response without a string `secret` field is reported as
    /// [`ClientError::MalformedResponse`].
    pub async fn get(&self, inputs: &CredentialInputs, path: &str) -> Result<String> {
        let envelope = self.envelopes.build(inputs).await?;
        let request = PathRequest {
            envelope: &envelope,
            path,
        };
        let body = self.dispatcher.dispatch(Endpoint::Get, &request).await?;
        let response: GetResponse = decode(Endpoint::Get, body)?;
        Ok(response.secret)
    }

    /// List the secret paths starting with `prefix`, in server order.
    pub async fn list(&self, inputs: &CredentialInputs, prefix: &str) -> Result<Vec<String>> {
        let envelope = self.envelopes.build(inputs).await?;
        let request = ListRequest {
            envelope: &envelope,
            prefix,
        };
        let body = self.dispatcher.dispatch(Endpoint::List, &request).await?;
        let response: ListResponse = decode(Endpoint::List, body)?;
        Ok(response.items)
    }

    /// Remove the secret stored under `path`.
    pub async fn delete(&self, inputs: &CredentialInputs, path: &str) -> Result<()> {
        let envelope = self.envelopes.build(inputs).await?;
        let request = PathRequest {
            envelope: &envelope,
            path,
        };
        self.dispatcher.dispatch(Endpoint::Delete, &request).await?;
        Ok(())
    }

    /// Run any [`VaultOperation`] and return its typed result.
    pub async fn execute(
        &self,
        inputs: &CredentialInputs,
        operation: &VaultOperation,
    ) -> Result<OperationResult> {
        match operation {
            VaultOperation::Put { path, secret } => {
                self.put(inputs, path, secret).await?;
                Ok(OperationResult::Stored)
            }
            VaultOperation::Get { path } => {
                self.get(inputs, path).await.map(OperationResult::Secret)
            }
            VaultOperation::List { prefix } => {
                self.list(inputs, prefix).await.map(OperationResult::Items)
            }
            VaultOperation::Delete { path } => {
                self.delete(inputs, path).await?;
                Ok(OperationResult::Deleted)
            }
        }
    }

    /// Probe the server. Needs no credentials.
    pub async fn health(&self) -> Result<HealthStatus> {
        let body = self.dispatcher.fetch(Endpoint::Health).await?;
        decode(Endpoint::Health, body)
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|e| ClientError::MalformedResponse {
        endpoint: endpoint.path(),
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
