//! Reading credential files into text.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{ClientError, Result};

/// A source of credential file contents.
///
/// The production implementation reads from the filesystem; tests supply
/// in-memory sources.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Read the full contents of `path` as text.
    ///
    /// Any failure is reported as [`ClientError::Read`].
    async fn read_text(&self, path: &Path) -> Result<String>;
}

/// Reads files from the local filesystem as UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextReader;

impl FileTextReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextSource for FileTextReader {
    async fn read_text(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path).await.map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "credential file read failed");
            ClientError::Read {
                path: PathBuf::from(path),
                source: e,
            }
        })
    }
}
