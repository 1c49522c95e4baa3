//! Edit Instruction Translator service

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::backend::{CompletionBackend, CompletionError, CompletionRequest};
use super::directive::{user_message, SYSTEM_DIRECTIVE};
use super::output::{interpret, ReplyVerdict};
use crate::logging::{EditEvent, EventType};
use crate::types::{GatewayError, Result};

/// Body of `POST /api/prompt`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    /// Free-text instruction
    #[serde(default, deserialize_with = "crate::types::string_or_null")]
    pub prompt: String,
    /// Current page content
    #[serde(default, deserialize_with = "crate::types::string_or_null")]
    pub file_content: String,
    /// Page name, for context only
    #[serde(default, deserialize_with = "crate::types::string_or_null")]
    pub file_name: String,
}

/// Response of `POST /api/prompt`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResult {
    pub updated_content: String,
    pub model: String,
    pub usage: Option<serde_json::Value>,
}

/// Sampling settings for page edits
#[derive(Debug, Clone, Copy)]
pub struct TranslatorSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 16_000,
        }
    }
}

/// Edit Instruction Translator
#[derive(Clone)]
pub struct EditTranslator {
    backend: Arc<dyn CompletionBackend>,
    settings: TranslatorSettings,
}

impl EditTranslator {
    pub fn new(backend: Arc<dyn CompletionBackend>, settings: TranslatorSettings) -> Self {
        Self { backend, settings }
    }

    /// Ask the model to apply `request.prompt` to the page
    ///
    /// One call, no retry. The reply must be a whole page, otherwise the
    /// caller gets the model's refusal or `InvalidOutput`.
    pub async fn translate(&self, request: &EditRequest) -> Result<EditResult> {
        if request.prompt.is_empty()
            || request.file_content.is_empty()
            || request.file_name.is_empty()
        {
            return Err(GatewayError::BadRequest(
                "Missing prompt, fileContent, or fileName".to_string(),
            ));
        }

        let completion_request = CompletionRequest::user(user_message(
            &request.file_name,
            &request.prompt,
            &request.file_content,
        ))
        .with_system(SYSTEM_DIRECTIVE)
        .with_temperature(self.settings.temperature)
        .with_max_tokens(self.settings.max_tokens);

        debug!(
            file = %request.file_name,
            model = %self.backend.id(),
            bytes = request.file_content.len(),
            "Requesting page edit"
        );

        let completion = self
            .backend
            .complete(completion_request)
            .await
            .map_err(|e| match e {
                CompletionError::Api { status, message } => {
                    warn!(status, message = %message, "Completion service error");
                    GatewayError::Upstream {
                        status,
                        message: "OpenAI API error".to_string(),
                        details: Some(serde_json::Value::String(message)),
                    }
                }
                other => GatewayError::Internal(other.to_string()),
            })?;

        let model = completion
            .model
            .unwrap_or_else(|| self.backend.id().to_string());

        match interpret(&completion.content) {
            ReplyVerdict::Document(updated_content) => {
                EditEvent::new(EventType::EditTranslated, &request.file_name)
                    .with_model(&model)
                    .with_bytes(updated_content.len())
                    .with_usage(completion.usage.as_ref())
                    .emit();

                Ok(EditResult {
                    updated_content,
                    model,
                    usage: completion.usage,
                })
            }
            ReplyVerdict::Refused(reason) => {
                info!(file = %request.file_name, "Model refused the edit");
                EditEvent::new(EventType::EditRejected, &request.file_name)
                    .with_model(&model)
                    .with_reason(&reason)
                    .with_usage(completion.usage.as_ref())
                    .emit();
                Err(GatewayError::Rejected(reason))
            }
            ReplyVerdict::Invalid => {
                warn!(
                    file = %request.file_name,
                    bytes = completion.content.len(),
                    "Model reply is not a whole HTML document"
                );
                Err(GatewayError::InvalidOutput)
            }
        }
    }
}
