//! Provider traits — the narrow contracts the core calls through.
//!
//! The inference service takes a populated prompt and returns free text that
//! the calling component parses against its own grammar. The embedding
//! service takes a text snippet and returns a fixed-dimension vector.

use async_trait::async_trait;

use crate::error::LlmError;

/// Message role in a chat completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    /// Convenience constructor for the single-prompt calls the scorers make.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
        }
    }
}

/// A completion response — free text the caller parses.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
}

/// Inference-service boundary.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// The model identifier, for logging.
    fn model_name(&self) -> &str;

    /// One synchronous (from the caller's view) completion round-trip.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

/// Embedding-service boundary.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one text snippet into a fixed-dimension vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;
}
