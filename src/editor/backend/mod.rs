//! Completion backend abstraction layer.
//!
//! - OpenAI-compatible chat completions
//! - Mock backend for testing

pub mod mock;
pub mod openai;
pub mod traits;

pub use mock::MockBackend;
pub use openai::OpenAiBackend;
pub use traits::{
    Completion, CompletionBackend, CompletionError, CompletionRequest, Message, MessageRole,
};
