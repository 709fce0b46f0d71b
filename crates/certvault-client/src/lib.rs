//! Authenticated client for the certvault secret service.
//!
//! Every operation against the vault server carries a credential envelope:
//! the client certificate, the policy document and the unseal passphrase.
//! This crate gathers that material from user-supplied files, checks it is
//! all present, reads both files concurrently, composes the request and sends
//! it over HTTP, folding the response into a typed result or a single
//! human-readable failure.
//!
//! # Architecture
//!
//! ```text
//! VaultClient (operations)
//! ├── CredentialEnvelopeBuilder (envelope)
//! │   └── TextSource ── FileTextReader (reader)
//! └── RequestDispatcher (dispatcher)
//!     └── Transport ── HttpTransport (transport)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use certvault_client::{ClientConfig, CredentialInputs, VaultClient};
//!
//! # async fn example() -> certvault_client::Result<()> {
//! let client = VaultClient::new(ClientConfig::from_env()?)?;
//! let inputs = CredentialInputs::new("client-cert.pem", "policies.json", "passphrase");
//!
//! client.put(&inputs, "app/db/password", "hunter2").await?;
//! let secret = client.get(&inputs, "app/db/password").await?;
//! let paths = client.list(&inputs, "app/").await?;
//! # let _ = (secret, paths);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod operations;
pub mod reader;
pub mod transport;

#[cfg(test)]
mod testing;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use dispatcher::{Endpoint, RequestDispatcher};
pub use envelope::{CredentialEnvelope, CredentialEnvelopeBuilder, CredentialInputs};
pub use error::{ClientError, OperationFailure, Result};
pub use operations::{HealthStatus, OperationResult, VaultClient, VaultOperation};
pub use reader::{FileTextReader, TextSource};
pub use transport::{HttpTransport, Transport, TransportResponse};
