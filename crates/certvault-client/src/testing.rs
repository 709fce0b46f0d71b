//! In-memory test doubles for [`Transport`] and [`TextSource`].

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ClientError, Result};
use crate::reader::TextSource;
use crate::transport::{Transport, TransportResponse};

/// One request seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub body: Option<String>,
}

impl RecordedCall {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.body.as_deref().unwrap_or("null")).unwrap()
    }
}

/// Transport returning queued responses in order and recording every call.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(TransportResponse::new(status, body));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, url: &str, body: Option<String>) -> TransportResponse {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_string(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("MockTransport ran out of responses")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<TransportResponse> {
        Ok(self.record("POST", url, Some(body)))
    }

    async fn get(&self, url: &str) -> Result<TransportResponse> {
        Ok(self.record("GET", url, None))
    }
}

/// Text source serving files from a map. Unknown paths fail with
/// [`ClientError::Read`].
#[derive(Debug, Default)]
pub(crate) struct MemorySource {
    files: HashMap<PathBuf, String>,
    delay: Option<Duration>,
    reads: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(PathBuf::from(path), contents.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of reads started.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Highest number of reads observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextSource for MemorySource {
    async fn read_text(&self, path: &Path) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.files.get(path).cloned().ok_or_else(|| ClientError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }
}
