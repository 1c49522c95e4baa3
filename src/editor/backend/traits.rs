//! Core traits for completion backends.

use async_trait::async_trait;

/// Error types for completion calls.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The service answered with a failure status
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A hosted text-completion service.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Backend identifier (the configured model name).
    fn id(&self) -> &str;

    /// Generate a completion (non-streaming).
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError>;
}

/// Request for a completion.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// System prompt (optional)
    pub system_prompt: Option<String>,
    /// Conversation messages
    pub messages: Vec<Message>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0-2.0)
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a new request with a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(content)],
            ..Default::default()
        }
    }

    /// Add a system prompt.
    pub fn with_system(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set max tokens.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp.clamp(0.0, 2.0));
        self
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
        }
    }
}

/// Raw completion as returned by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    /// Generated text of the first choice (empty if none)
    pub content: String,
    /// Model the service reports having used
    pub model: Option<String>,
    /// Token accounting, untouched
    pub usage: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::user("Change the phone number")
            .with_system("You are a website editor")
            .with_max_tokens(16_000)
            .with_temperature(0.1);

        assert_eq!(request.system_prompt.as_deref(), Some("You are a website editor"));
        assert_eq!(request.messages, vec![Message::user("Change the phone number")]);
        assert_eq!(request.max_tokens, Some(16_000));
        assert_eq!(request.temperature, Some(0.1));
    }

    #[test]
    fn test_temperature_is_clamped() {
        assert_eq!(CompletionRequest::default().with_temperature(9.0).temperature, Some(2.0));
        assert_eq!(CompletionRequest::default().with_temperature(-1.0).temperature, Some(0.0));
    }
}
