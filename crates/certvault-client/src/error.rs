//! Error types for the certvault client.
//!
//! Every public operation surfaces failures through [`ClientError`]. Each
//! variant renders to exactly one human-readable message, which is what the
//! front-end shows to the user.

use std::path::PathBuf;

/// Message returned when a credential input is missing.
pub const VALIDATION_MESSAGE: &str = "Certificate, policy, and passphrase are required.";

/// Message returned when a credential file cannot be read.
pub const READ_FAILURE_MESSAGE: &str = "Unable to read file";

/// Message used when the server rejects a request without an `error` field.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Request failed";

/// A request the server answered with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailure {
    /// HTTP status code of the response.
    pub status: u16,
    /// Server-supplied `error` field, or [`FALLBACK_FAILURE_MESSAGE`].
    pub message: String,
    /// Optional server-supplied `detail` field.
    pub detail: Option<String>,
}

impl OperationFailure {
    /// Build a failure from a status code and an optionally decoded body.
    pub fn from_body(status: u16, body: Option<&serde_json::Value>) -> Self {
        let field = |name: &str| {
            body.and_then(|b| b.get(name))
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            status,
            message: field("error").unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string()),
            detail: field("detail"),
        }
    }
}

impl std::fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for OperationFailure {}

/// Unified error type for the certvault client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Certificate, policy or passphrase was not supplied.
    #[error("Certificate, policy, and passphrase are required.")]
    Validation,

    /// A credential file could not be read or decoded.
    ///
    /// The underlying cause is kept as the error source but never shown in
    /// the message.
    #[error("Unable to read file")]
    Read {
        /// The file that failed.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server answered with a non-success status.
    #[error(transparent)]
    Operation(#[from] OperationFailure),

    /// The HTTP call could not be completed.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// The server answered with a success status but an unexpected body.
    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        /// Endpoint path that produced the response.
        endpoint: &'static str,
        /// What was wrong with the body.
        reason: String,
    },

    /// A request payload could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl ClientError {
    /// Return the server failure if this error came from a rejected request.
    pub fn as_operation_failure(&self) -> Option<&OperationFailure> {
        match self {
            Self::Operation(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ClientError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
