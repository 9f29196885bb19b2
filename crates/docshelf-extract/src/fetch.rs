//! Document-fetch collaborator.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Content and response metadata for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedDocument {
    pub content: String,
    /// Last-modified value as the transport reports it (HTTP-date style).
    pub last_modified: Option<String>,
}

/// Errors a fetcher may return. Callers treat every variant the same way:
/// the document is unavailable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("failed to read '{identifier}': {source}")]
    Io {
        identifier: String,
        #[source]
        source: std::io::Error,
    },
}

/// Retrieves a document by catalog identifier.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, identifier: &str) -> Result<FetchedDocument, FetchError>;
}

/// Reads documents from a directory; the file's mtime becomes `last_modified`.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DocumentFetcher for FsFetcher {
    async fn fetch(&self, identifier: &str) -> Result<FetchedDocument, FetchError> {
        let path = self.root.join(identifier);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound(identifier.to_string())
            } else {
                FetchError::Io {
                    identifier: identifier.to_string(),
                    source: e,
                }
            }
        })?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        let last_modified = tokio::fs::metadata(&path)
            .await
            .ok()
            .and_then(|meta| meta.modified().ok())
            .map(|mtime| DateTime::<Utc>::from(mtime).to_rfc2822());

        Ok(FetchedDocument {
            content,
            last_modified,
        })
    }
}

/// In-memory fetcher keyed by identifier; unknown identifiers are `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    documents: HashMap<String, FetchedDocument>,
}

impl MemoryFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with no last-modified value.
    #[must_use]
    pub fn with(mut self, identifier: &str, content: &str) -> Self {
        self.insert(
            identifier,
            FetchedDocument {
                content: content.to_string(),
                last_modified: None,
            },
        );
        self
    }

    pub fn insert(&mut self, identifier: &str, document: FetchedDocument) {
        self.documents.insert(identifier.to_string(), document);
    }
}

#[async_trait]
impl DocumentFetcher for MemoryFetcher {
    async fn fetch(&self, identifier: &str) -> Result<FetchedDocument, FetchError> {
        self.documents
            .get(identifier)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(identifier.to_string()))
    }
}
