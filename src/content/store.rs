//! Content store abstraction
//!
//! `ContentStore` is the seam between the gateway's request rules and the
//! remote repository, so the rules can be exercised against any store.

use async_trait::async_trait;
use serde_json::Value;

use super::allowlist::EditableFile;

/// Error types for content store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store answered with a failure status
    #[error("Store returned HTTP {status}")]
    Api { status: u16, details: Option<Value> },

    /// The store could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The store's payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

/// A file as currently stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Decoded text content
    pub content: String,
    /// Revision token of this version
    pub sha: String,
    /// Path as reported by the store
    pub path: String,
}

/// A conditional update
#[derive(Debug, Clone)]
pub struct Commit {
    /// New plain-text content
    pub content: String,
    /// Revision token the update is conditioned on
    pub sha: String,
    /// Commit message
    pub message: String,
}

/// Outcome of a successful commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Revision token of the new version
    pub sha: String,
    /// Browser URL of the committed file
    pub html_url: Option<String>,
}

/// Remote version-controlled file host
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the current content and revision token of a file
    async fn fetch(&self, file: EditableFile) -> Result<StoredFile, StoreError>;

    /// Replace a file's content if its revision token still matches
    async fn commit(&self, file: EditableFile, commit: Commit) -> Result<CommitReceipt, StoreError>;
}
