//! GitHub contents API store
//!
//! Uses the repository contents endpoint:
//! - `GET  /repos/{owner}/{repo}/contents/{path}` for content + blob sha
//! - `PUT  /repos/{owner}/{repo}/contents/{path}` with `sha` for a conditional commit
//!
//! Content travels base64-encoded in both directions.

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::allowlist::EditableFile;
use super::store::{Commit, CommitReceipt, ContentStore, StoreError, StoredFile};
use crate::types::{GatewayError, Result};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = "BYSC-Website-Editor";

/// Content store backed by a GitHub repository
pub struct GitHubStore {
    client: Client,
    repo_url: String,
    branch: String,
}

/// Contents API file response (only the fields used)
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
    path: String,
}

/// Contents API update request body
#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    message: &'a str,
    content: String,
    sha: &'a str,
    branch: &'a str,
}

/// Contents API update response
#[derive(Debug, Deserialize)]
struct UpdateResponse {
    content: CommittedContent,
}

#[derive(Debug, Deserialize)]
struct CommittedContent {
    sha: String,
    html_url: Option<String>,
}

impl GitHubStore {
    /// Create a store for `repo_url` (`{api}/repos/{owner}/{repo}`)
    pub fn new(
        repo_url: impl Into<String>,
        branch: impl Into<String>,
        token: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| GatewayError::Config("GITHUB_TOKEN contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(GITHUB_ACCEPT));

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to create GitHub client: {}", e)))?;

        Ok(Self {
            client,
            repo_url: repo_url.into().trim_end_matches('/').to_string(),
            branch: branch.into(),
        })
    }

    fn contents_url(&self, file: EditableFile) -> String {
        format!("{}/contents/{}", self.repo_url, file.path())
    }
}

#[async_trait]
impl ContentStore for GitHubStore {
    async fn fetch(&self, file: EditableFile) -> std::result::Result<StoredFile, StoreError> {
        let url = self.contents_url(file);
        debug!(url = %url, "Fetching file from GitHub");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, file = %file, "GitHub fetch failed");
            return Err(StoreError::Api {
                status: status.as_u16(),
                details: None,
            });
        }

        let body: ContentsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(StoredFile {
            content: decode_content(&body.content)?,
            sha: body.sha,
            path: body.path,
        })
    }

    async fn commit(
        &self,
        file: EditableFile,
        commit: Commit,
    ) -> std::result::Result<CommitReceipt, StoreError> {
        let url = self.contents_url(file);
        debug!(url = %url, branch = %self.branch, "Committing file to GitHub");

        let body = UpdateRequest {
            message: &commit.message,
            content: general_purpose::STANDARD.encode(commit.content.as_bytes()),
            sha: &commit.sha,
            branch: &self.branch,
        };

        let response = self
            .client
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let details = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
            warn!(status = %status, file = %file, "GitHub commit failed");
            return Err(StoreError::Api {
                status: status.as_u16(),
                details: Some(details),
            });
        }

        let result: UpdateResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(CommitReceipt {
            sha: result.content.sha,
            html_url: result.content.html_url,
        })
    }
}

/// Decode the contents API's base64 payload
///
/// GitHub wraps the encoding at 60 columns; the line breaks are not part of
/// the data.
fn decode_content(encoded: &str) -> std::result::Result<String, StoreError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| StoreError::Decode(format!("Invalid base64 content: {}", e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer) -> GitHubStore {
        GitHubStore::new(
            format!("{}/repos/QED411/bysc-website", server.uri()),
            "master",
            "ghp_test",
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_decode_content_ignores_line_wrapping() {
        let encoded = general_purpose::STANDARD.encode("<!DOCTYPE html><html><body>Hi</body></html>");
        let (a, b) = encoded.split_at(20);
        let wrapped = format!("{}\n{}\n", a, b);
        assert_eq!(
            decode_content(&wrapped).unwrap(),
            "<!DOCTYPE html><html><body>Hi</body></html>"
        );
    }

    #[test]
    fn test_decode_content_rejects_garbage() {
        assert!(matches!(
            decode_content("not base64!!"),
            Err(StoreError::Decode(_))
        ));
    }

    #[test]
    fn test_invalid_token_is_config_error() {
        let result = GitHubStore::new("http://localhost/repos/a/b", "master", "bad\ntoken", None);
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[tokio::test]
    async fn test_fetch_sends_headers_and_decodes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/QED411/bysc-website/contents/coaching.html"))
            .and(header("authorization", "Bearer ghp_test"))
            .and(header("accept", GITHUB_ACCEPT))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "coaching.html",
                "path": "coaching.html",
                "sha": "abc123",
                "encoding": "base64",
                "content": general_purpose::STANDARD.encode("<html>coach</html>"),
            })))
            .expect(1)
            .mount(&server)
            .await;

        let file = store_for(&server).fetch(EditableFile::Coaching).await.unwrap();
        assert_eq!(file.content, "<html>coach</html>");
        assert_eq!(file.sha, "abc123");
        assert_eq!(file.path, "coaching.html");
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
            .mount(&server)
            .await;

        let err = store_for(&server).fetch(EditableFile::Index).await.unwrap_err();
        assert!(matches!(err, StoreError::Api { status: 404, details: None }));
    }

    #[tokio::test]
    async fn test_commit_encodes_content_and_targets_branch() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/repos/QED411/bysc-website/contents/medical.html"))
            .and(body_partial_json(json!({
                "message": "Update medical.html via BYSC Editor",
                "content": general_purpose::STANDARD.encode("<html>new</html>"),
                "sha": "abc123",
                "branch": "master",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": {
                    "sha": "def456",
                    "html_url": "https://github.com/QED411/bysc-website/blob/master/medical.html"
                },
                "commit": { "sha": "c0ffee" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = store_for(&server)
            .commit(
                EditableFile::Medical,
                Commit {
                    content: "<html>new</html>".into(),
                    sha: "abc123".into(),
                    message: "Update medical.html via BYSC Editor".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(receipt.sha, "def456");
        assert_eq!(
            receipt.html_url.as_deref(),
            Some("https://github.com/QED411/bysc-website/blob/master/medical.html")
        );
    }

    #[tokio::test]
    async fn test_commit_conflict_carries_details() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "message": "index.html does not match stale",
                "documentation_url": "https://docs.github.com/rest/repos/contents"
            })))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .commit(
                EditableFile::Index,
                Commit {
                    content: "<html></html>".into(),
                    sha: "stale".into(),
                    message: "edit".into(),
                },
            )
            .await
            .unwrap_err();

        match err {
            StoreError::Api { status, details } => {
                assert_eq!(status, 409);
                assert_eq!(details.unwrap()["message"], "index.html does not match stale");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_commit_failure_with_text_body() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .commit(
                EditableFile::Index,
                Commit {
                    content: "<html></html>".into(),
                    sha: "abc".into(),
                    message: "edit".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Api { status: 502, details: Some(Value::String(ref s)) } if s == "Bad Gateway"
        ));
    }
}
