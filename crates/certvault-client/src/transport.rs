//! HTTP transport seam.
//!
//! The dispatcher talks to the network only through [`Transport`]. The
//! production implementation, [`HttpTransport`], wraps a `reqwest::Client`;
//! tests swap in mocks that return canned responses.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Create a response from a status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the vault server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` with `Content-Type: application/json`.
    async fn post_json(&self, url: &str, body: String) -> Result<TransportResponse>;

    /// GET `url`.
    async fn get(&self, url: &str) -> Result<TransportResponse>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport honoring the timeout and user agent in `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| ClientError::InvalidConfig {
            reason: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn finish(response: reqwest::Response) -> Result<TransportResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<TransportResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await?;

        Self::finish(response).await
    }

    async fn get(&self, url: &str) -> Result<TransportResponse> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        Self::finish(response).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn success_range() {
        assert!(TransportResponse::new(200, "{}").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(199, "").is_success());
        assert!(!TransportResponse::new(301, "").is_success());
        assert!(!TransportResponse::new(403, "").is_success());
        assert!(!TransportResponse::new(500, "").is_success());
    }

    #[test]
    fn builds_with_timeout() {
        let config = ClientConfig::new().with_timeout(Duration::from_secs(2));
        assert!(HttpTransport::new(&config).is_ok());
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        // Bind then drop to obtain a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let err = transport
            .post_json(&format!("http://127.0.0.1:{port}/put"), "{}".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }

    #[test]
    fn transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpTransport>();
    }
}
