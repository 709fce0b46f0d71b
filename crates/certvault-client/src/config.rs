//! Client configuration.
//!
//! [`ClientConfig`] is injected into [`crate::VaultClient`] at construction.
//! Defaults point at a local vault server; a builder-style API lets callers
//! override individual fields, and [`ClientConfig::from_env`] applies the
//! process environment.

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Base URL used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";

/// Environment variable holding the base URL override.
pub const BASE_URL_ENV: &str = "VAULT_API_URL";

/// Environment variable holding an optional request timeout in seconds.
pub const TIMEOUT_ENV: &str = "VAULT_API_TIMEOUT_SECS";

/// Settings for the vault client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL override. `None` means [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,

    /// Per-request timeout applied by the HTTP transport.
    ///
    /// Default: **none** (whatever the transport does on its own).
    pub timeout: Option<Duration>,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: None,
            user_agent: format!("certvault/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout = match get(TIMEOUT_ENV) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ClientError::InvalidConfig {
                    reason: format!(
                        "{TIMEOUT_ENV} must be a whole number of seconds, got `{raw}`"
                    ),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            base_url: get(BASE_URL_ENV),
            timeout,
            ..Self::default()
        })
    }

    /// Set the base URL override.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The base URL requests are sent to, without a trailing slash.
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    /// Check that the effective base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let base = self.effective_base_url();
        let parsed = url::Url::parse(base).map_err(|e| ClientError::InvalidConfig {
            reason: format!("invalid base URL `{base}`: {e}"),
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::InvalidConfig {
                reason: format!("unsupported scheme `{other}` in base URL `{base}`"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_uses_local_endpoint() {
        let cfg = ClientConfig::default();
        assert!(cfg.base_url.is_none());
        assert!(cfg.timeout.is_none());
        assert_eq!(cfg.effective_base_url(), DEFAULT_BASE_URL);
        assert!(cfg.user_agent.starts_with("certvault/"));
    }

    #[test]
    fn override_wins_and_trailing_slash_is_trimmed() {
        let cfg = ClientConfig::new().with_base_url("https://vault.internal/api/");
        assert_eq!(cfg.effective_base_url(), "https://vault.internal/api");
    }

    #[test]
    fn from_lookup_reads_override_and_timeout() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "http://10.0.0.5:9000/api"),
            (TIMEOUT_ENV, "15"),
        ]))
        .unwrap();
        assert_eq!(cfg.effective_base_url(), "http://10.0.0.5:9000/api");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn from_lookup_ignores_empty_values() {
        let cfg =
            ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, "  "), (TIMEOUT_ENV, "")])).unwrap();
        assert!(cfg.base_url.is_none());
        assert!(cfg.timeout.is_none());
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfig { .. }));
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn validate_accepts_http_and_https() {
        assert!(ClientConfig::new().validate().is_ok());
        assert!(
            ClientConfig::new()
                .with_base_url("https://vault.example.com")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn validate_rejects_relative_and_foreign_schemes() {
        assert!(ClientConfig::new().with_base_url("/api").validate().is_err());
        assert!(
            ClientConfig::new()
                .with_base_url("ftp://vault.example.com")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn builder_chaining() {
        let cfg = ClientConfig::new()
            .with_base_url("http://localhost:1234")
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("tests/1.0");
        assert_eq!(cfg.base_url.as_deref(), Some("http://localhost:1234"));
        assert_eq!(cfg.timeout, Some(Duration::from_secs(3)));
        assert_eq!(cfg.user_agent, "tests/1.0");
    }
}
