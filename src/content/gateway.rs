//! Request rules for reading and committing editable pages
//!
//! The gateway validates the request and enforces the allow-list before the
//! store is touched, then translates store failures into gateway errors.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::allowlist::EditableFile;
use super::store::{Commit, ContentStore, StoreError};
use crate::logging::{EditEvent, EventType};
use crate::types::{GatewayError, Result};

/// Body of `POST /api/github`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WriteRequest {
    #[serde(default, deserialize_with = "crate::types::string_or_null")]
    pub file: String,
    #[serde(default, deserialize_with = "crate::types::string_or_null")]
    pub content: String,
    #[serde(default, deserialize_with = "crate::types::string_or_null")]
    pub sha: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /api/github`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSnapshot {
    pub content: String,
    pub sha: String,
    pub path: String,
}

/// Response of `POST /api/github`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReceipt {
    pub success: bool,
    pub sha: String,
    pub url: Option<String>,
}

/// Content Store Gateway
#[derive(Clone)]
pub struct ContentGateway {
    store: Arc<dyn ContentStore>,
}

impl ContentGateway {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Read an allow-listed page with its revision token
    pub async fn read_file(&self, path: &str) -> Result<FileSnapshot> {
        let file: EditableFile = path.parse()?;

        let stored = self.store.fetch(file).await.map_err(|e| match e {
            StoreError::Api { status, .. } => GatewayError::Upstream {
                status,
                message: "Failed to fetch file from GitHub".to_string(),
                details: None,
            },
            other => GatewayError::Internal(other.to_string()),
        })?;

        EditEvent::new(EventType::FileRead, file)
            .with_sha(&stored.sha)
            .with_bytes(stored.content.len())
            .emit();

        Ok(FileSnapshot {
            content: stored.content,
            sha: stored.sha,
            path: stored.path,
        })
    }

    /// Commit new content for a page, conditioned on its revision token
    ///
    /// Empty `content` is refused along with missing fields; a page cannot be
    /// blanked through the editor.
    pub async fn write_file(&self, request: WriteRequest) -> Result<WriteReceipt> {
        if request.file.is_empty() || request.content.is_empty() || request.sha.is_empty() {
            return Err(GatewayError::BadRequest(
                "Missing file, content, or sha".to_string(),
            ));
        }

        let file: EditableFile = request.file.parse()?;

        let message = request
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| default_commit_message(file));
        let bytes = request.content.len();
        let base_sha = request.sha;

        info!(file = %file, base_sha = %base_sha, "Committing page edit");

        let receipt = self
            .store
            .commit(
                file,
                Commit {
                    content: request.content,
                    sha: base_sha.clone(),
                    message,
                },
            )
            .await
            .map_err(|e| match e {
                StoreError::Api { status, details } => GatewayError::Upstream {
                    status,
                    message: "Failed to commit".to_string(),
                    details,
                },
                other => GatewayError::Internal(other.to_string()),
            })?;

        EditEvent::new(EventType::FileCommitted, file)
            .with_sha(&receipt.sha)
            .with_base_sha(&base_sha)
            .with_bytes(bytes)
            .emit();

        Ok(WriteReceipt {
            success: true,
            sha: receipt.sha,
            url: receipt.html_url,
        })
    }
}

/// Commit message used when the editor does not supply one
pub fn default_commit_message(file: EditableFile) -> String {
    format!("Update {} via BYSC Editor", file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::store::{CommitReceipt, StoredFile};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory store that mimics GitHub's sha check
    struct MemoryStore {
        files: Mutex<Vec<(EditableFile, String, String)>>,
        calls: Mutex<u32>,
        messages: Mutex<Vec<String>>,
    }

    impl MemoryStore {
        fn with(file: EditableFile, content: &str, sha: &str) -> Self {
            Self {
                files: Mutex::new(vec![(file, content.to_string(), sha.to_string())]),
                calls: Mutex::new(0),
                messages: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ContentStore for MemoryStore {
        async fn fetch(&self, file: EditableFile) -> std::result::Result<StoredFile, StoreError> {
            *self.calls.lock().unwrap() += 1;
            self.files
                .lock()
                .unwrap()
                .iter()
                .find(|(f, _, _)| *f == file)
                .map(|(f, content, sha)| StoredFile {
                    content: content.clone(),
                    sha: sha.clone(),
                    path: f.path().to_string(),
                })
                .ok_or(StoreError::Api {
                    status: 404,
                    details: None,
                })
        }

        async fn commit(
            &self,
            file: EditableFile,
            commit: Commit,
        ) -> std::result::Result<CommitReceipt, StoreError> {
            *self.calls.lock().unwrap() += 1;
            self.messages.lock().unwrap().push(commit.message.clone());
            let mut files = self.files.lock().unwrap();
            let entry = files
                .iter_mut()
                .find(|(f, _, _)| *f == file)
                .ok_or(StoreError::Api {
                    status: 404,
                    details: None,
                })?;
            if entry.2 != commit.sha {
                return Err(StoreError::Api {
                    status: 409,
                    details: Some(serde_json::json!({
                        "message": format!("{} does not match {}", file, commit.sha)
                    })),
                });
            }
            let new_sha = format!("{}-next", entry.2);
            entry.1 = commit.content;
            entry.2 = new_sha.clone();
            Ok(CommitReceipt {
                sha: new_sha,
                html_url: Some(format!("https://example.test/{}", file)),
            })
        }
    }

    fn gateway(store: &Arc<MemoryStore>) -> ContentGateway {
        ContentGateway::new(Arc::clone(store) as Arc<dyn ContentStore>)
    }

    #[tokio::test]
    async fn test_read_returns_snapshot() {
        let store = Arc::new(MemoryStore::with(EditableFile::Coaching, "<html>c</html>", "abc123"));
        let snapshot = gateway(&store).read_file("coaching.html").await.unwrap();
        assert_eq!(
            snapshot,
            FileSnapshot {
                content: "<html>c</html>".into(),
                sha: "abc123".into(),
                path: "coaching.html".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_disallowed_paths_never_reach_store() {
        let store = Arc::new(MemoryStore::with(EditableFile::Index, "<html></html>", "abc"));
        let gw = gateway(&store);

        for path in ["secrets.env", "api/github.js", "../index.html", "INDEX.html"] {
            let err = gw.read_file(path).await.unwrap_err();
            assert!(matches!(err, GatewayError::Forbidden(_)));

            let err = gw
                .write_file(WriteRequest {
                    file: path.into(),
                    content: "<html></html>".into(),
                    sha: "abc".into(),
                    message: None,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, GatewayError::Forbidden(_)));
        }

        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_request() {
        let store = Arc::new(MemoryStore::with(EditableFile::Index, "<html></html>", "abc"));
        let gw = gateway(&store);

        let cases = [
            ("", "<html></html>", "abc"),
            ("index.html", "<html></html>", ""),
            ("index.html", "", "abc"),
        ];
        for (file, content, sha) in cases {
            let err = gw
                .write_file(WriteRequest {
                    file: file.into(),
                    content: content.into(),
                    sha: sha.into(),
                    message: None,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, GatewayError::BadRequest(_)));
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_fields_checked_before_allow_list() {
        let store = Arc::new(MemoryStore::with(EditableFile::Index, "<html></html>", "abc"));
        let err = gateway(&store)
            .write_file(WriteRequest {
                file: "not-allowed.html".into(),
                content: String::new(),
                sha: "abc".into(),
                message: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_round_trip_yields_new_token() {
        let store = Arc::new(MemoryStore::with(EditableFile::Conduct, "<html>rules</html>", "v1"));
        let gw = gateway(&store);

        let snapshot = gw.read_file("conduct.html").await.unwrap();
        let receipt = gw
            .write_file(WriteRequest {
                file: snapshot.path.clone(),
                content: snapshot.content.clone(),
                sha: snapshot.sha.clone(),
                message: None,
            })
            .await
            .unwrap();

        assert!(receipt.success);
        assert_ne!(receipt.sha, snapshot.sha);
        assert_eq!(receipt.url.as_deref(), Some("https://example.test/conduct.html"));
    }

    #[tokio::test]
    async fn test_stale_token_surfaces_upstream_error() {
        let store = Arc::new(MemoryStore::with(EditableFile::Index, "<html>a</html>", "v1"));
        let gw = gateway(&store);

        let first = gw.read_file("index.html").await.unwrap();
        gw.write_file(WriteRequest {
            file: "index.html".into(),
            content: "<html>b</html>".into(),
            sha: first.sha.clone(),
            message: None,
        })
        .await
        .unwrap();

        let err = gw
            .write_file(WriteRequest {
                file: "index.html".into(),
                content: "<html>c</html>".into(),
                sha: first.sha,
                message: None,
            })
            .await
            .unwrap_err();

        match err {
            GatewayError::Upstream {
                status,
                message,
                details,
            } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Failed to commit");
                assert!(details.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let current = gw.read_file("index.html").await.unwrap();
        assert_eq!(current.content, "<html>b</html>");
    }

    #[tokio::test]
    async fn test_commit_message_defaults_from_path() {
        let store = Arc::new(MemoryStore::with(EditableFile::Gotsport, "<html></html>", "v1"));
        let gw = gateway(&store);

        gw.write_file(WriteRequest {
            file: "gotsport.html".into(),
            content: "<html>x</html>".into(),
            sha: "v1".into(),
            message: None,
        })
        .await
        .unwrap();

        gw.write_file(WriteRequest {
            file: "gotsport.html".into(),
            content: "<html>y</html>".into(),
            sha: "v1-next".into(),
            message: Some("Fix registration link".into()),
        })
        .await
        .unwrap();

        assert_eq!(
            *store.messages.lock().unwrap(),
            vec![
                "Update gotsport.html via BYSC Editor".to_string(),
                "Fix registration link".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_read_failure_maps_status() {
        let store = Arc::new(MemoryStore::with(EditableFile::Index, "<html></html>", "v1"));
        let err = gateway(&store).read_file("medical.html").await.unwrap_err();
        assert!(matches!(err, GatewayError::Upstream { status: 404, details: None, .. }));
    }
}
