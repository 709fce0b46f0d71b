//! Credential envelope assembly.
//!
//! Every authenticated request carries the same three pieces of credential
//! material: the client certificate (PEM), the policy document (JSON) and
//! the unseal passphrase. [`CredentialEnvelopeBuilder`] checks that all three
//! were supplied, reads both files concurrently and produces a
//! [`CredentialEnvelope`]. A new envelope is built for every operation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::reader::TextSource;

/// Raw credential inputs as collected by a front-end.
#[derive(Clone, Default)]
pub struct CredentialInputs {
    /// Path to the client certificate PEM file.
    pub certificate: Option<PathBuf>,
    /// Path to the policy JSON file.
    pub policy: Option<PathBuf>,
    /// Unseal passphrase.
    pub passphrase: String,
}

impl CredentialInputs {
    /// Bundle inputs that are all present.
    pub fn new(
        certificate: impl Into<PathBuf>,
        policy: impl Into<PathBuf>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            certificate: Some(certificate.into()),
            policy: Some(policy.into()),
            passphrase: passphrase.into(),
        }
    }

    /// Return the three inputs if every one is present and non-empty.
    fn require(&self) -> Result<(&Path, &Path, &str)> {
        fn present(path: Option<&Path>) -> Option<&Path> {
            path.filter(|p| !p.as_os_str().is_empty())
        }

        match (
            present(self.certificate.as_deref()),
            present(self.policy.as_deref()),
        ) {
            (Some(cert), Some(policy)) if !self.passphrase.is_empty() => {
                Ok((cert, policy, self.passphrase.as_str()))
            }
            _ => Err(ClientError::Validation),
        }
    }
}

impl std::fmt::Debug for CredentialInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialInputs")
            .field("certificate", &self.certificate)
            .field("policy", &self.policy)
            .field("passphrase_set", &!self.passphrase.is_empty())
            .finish()
    }
}

/// Credential material attached to every authenticated request.
///
/// Serializes to `{certificatePem, policiesJson, passphrase}`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialEnvelope {
    certificate_pem: String,
    policies_json: String,
    passphrase: String,
}

impl CredentialEnvelope {
    pub(crate) fn new(certificate_pem: String, policies_json: String, passphrase: String) -> Self {
        Self {
            certificate_pem,
            policies_json,
            passphrase,
        }
    }

    /// The certificate PEM text.
    pub fn certificate_pem(&self) -> &str {
        &self.certificate_pem
    }

    /// The policy document text.
    pub fn policies_json(&self) -> &str {
        &self.policies_json
    }

    /// The passphrase.
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }
}

impl std::fmt::Debug for CredentialEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialEnvelope")
            .field("certificate_pem_len", &self.certificate_pem.len())
            .field("policies_json_len", &self.policies_json.len())
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

/// Validates credential inputs and reads them into a [`CredentialEnvelope`].
#[derive(Clone)]
pub struct CredentialEnvelopeBuilder {
    source: Arc<dyn TextSource>,
}

impl CredentialEnvelopeBuilder {
    /// Create a builder reading files through `source`.
    pub fn new(source: Arc<dyn TextSource>) -> Self {
        Self { source }
    }

    /// Build an envelope from raw inputs.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] if any input is missing; no file is read.
    /// - [`ClientError::Read`] if either file cannot be read. The other read
    ///   is abandoned.
    pub async fn build(&self, inputs: &CredentialInputs) -> Result<CredentialEnvelope> {
        let (cert_path, policy_path, passphrase) = inputs.require()?;

        let (certificate_pem, policies_json) = tokio::try_join!(
            self.source.read_text(cert_path),
            self.source.read_text(policy_path),
        )?;

        Ok(CredentialEnvelope::new(
            certificate_pem,
            policies_json,
            passphrase.to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
