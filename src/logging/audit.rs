//! Edit audit trail
//!
//! One JSON line per page read, commit or translation, logged on the
//! `gatehouse::audit` target so it can be routed separately from request
//! logs. Page content and secrets are never included; only sizes, revision
//! tokens and the completion service's token accounting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Tracing target for audit events
pub const AUDIT_TARGET: &str = "gatehouse::audit";

/// Audit event types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Page fetched from the content store
    FileRead,
    /// New page content committed
    FileCommitted,
    /// Completion service proposed new page content
    EditTranslated,
    /// Completion service refused the instruction
    EditRejected,
}

/// A single audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditEvent {
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    /// Page the event concerns
    pub file: String,
    /// Revision token after the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// Revision token a commit was conditioned on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_sha: Option<String>,
    /// Content size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// Model that produced a translation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Token accounting as reported by the completion service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<serde_json::Value>,
    /// Refusal reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EditEvent {
    pub fn new(event_type: EventType, file: impl ToString) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type,
            file: file.to_string(),
            sha: None,
            base_sha: None,
            bytes: None,
            model: None,
            usage: None,
            reason: None,
        }
    }

    pub fn with_sha(mut self, sha: &str) -> Self {
        self.sha = Some(sha.to_string());
        self
    }

    pub fn with_base_sha(mut self, sha: &str) -> Self {
        self.base_sha = Some(sha.to_string());
        self
    }

    pub fn with_bytes(mut self, bytes: usize) -> Self {
        self.bytes = Some(bytes);
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    pub fn with_usage(mut self, usage: Option<&serde_json::Value>) -> Self {
        self.usage = usage.cloned();
        self
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    /// Convert to JSONL line
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Write the event to the audit target
    pub fn emit(&self) {
        match self.to_jsonl() {
            Ok(line) => info!(target: AUDIT_TARGET, event = %line),
            Err(e) => warn!(target: AUDIT_TARGET, "Failed to serialize audit event: {}", e),
        }
    }
}
