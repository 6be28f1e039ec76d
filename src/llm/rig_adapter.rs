//! Adapter bridging rig-core models to the crate's provider traits.

use async_trait::async_trait;

use rig::completion::{AssistantContent, CompletionError, CompletionModel, Message};
use rig::embeddings::embedding::{EmbeddingError, EmbeddingModel};

use crate::error::LlmError;
use crate::llm::provider::{
    ChatMessage, CompletionRequest, CompletionResponse, LlmProvider, Role,
};

/// Adapter that exposes a rig `CompletionModel` as an `LlmProvider`.
pub struct RigAdapter<M: CompletionModel> {
    model: M,
    model_name: String,
    provider_name: String,
}

impl<M: CompletionModel> RigAdapter<M> {
    pub fn new(model: M, model_name: &str, provider_name: &str) -> Self {
        Self {
            model,
            model_name: model_name.to_string(),
            provider_name: provider_name.to_string(),
        }
    }

    fn map_error(&self, err: CompletionError) -> LlmError {
        let reason = err.to_string();
        let lower = reason.to_lowercase();
        if lower.contains("429") || lower.contains("rate limit") || lower.contains("rate_limit") {
            LlmError::RateLimited {
                provider: self.provider_name.clone(),
                retry_after: None,
            }
        } else if lower.contains("401") || lower.contains("authentication") {
            LlmError::AuthFailed {
                provider: self.provider_name.clone(),
            }
        } else {
            LlmError::RequestFailed {
                provider: self.provider_name.clone(),
                reason,
            }
        }
    }
}

#[async_trait]
impl<M: CompletionModel> LlmProvider for RigAdapter<M> {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        // rig models take a final prompt plus preamble and history; split
        // our flat message list accordingly.
        let mut preamble_parts: Vec<String> = Vec::new();
        let mut history: Vec<Message> = Vec::new();
        let mut prompt: Option<String> = None;

        let count = request.messages.len();
        for (i, msg) in request.messages.into_iter().enumerate() {
            match msg.role {
                Role::System => preamble_parts.push(msg.content),
                Role::Assistant => history.push(Message::assistant(msg.content)),
                Role::User => {
                    if i + 1 == count {
                        prompt = Some(msg.content);
                    } else {
                        history.push(Message::user(msg.content));
                    }
                }
            }
        }

        let prompt = prompt.ok_or_else(|| LlmError::InvalidResponse {
            provider: self.provider_name.clone(),
            reason: "completion request must end with a user message".to_string(),
        })?;

        let mut builder = self.model.completion_request(prompt);
        if !preamble_parts.is_empty() {
            builder = builder.preamble(preamble_parts.join("\n\n"));
        }
        if !history.is_empty() {
            builder = builder.messages(history);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;

        let content = response
            .choice
            .iter()
            .filter_map(|part| match part {
                AssistantContent::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("");

        if content.is_empty() {
            return Err(LlmError::InvalidResponse {
                provider: self.provider_name.clone(),
                reason: "model returned no text content".to_string(),
            });
        }

        Ok(CompletionResponse { content })
    }
}

/// Adapter that exposes a rig `EmbeddingModel` as an `EmbeddingProvider`.
pub struct RigEmbedder<E: EmbeddingModel> {
    model: E,
}

impl<E: EmbeddingModel> RigEmbedder<E> {
    pub fn new(model: E) -> Self {
        Self { model }
    }

    fn map_error(err: EmbeddingError) -> LlmError {
        LlmError::EmbeddingFailed {
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl<E: EmbeddingModel> crate::llm::provider::EmbeddingProvider for RigEmbedder<E> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let embedding = self
            .model
            .embed_text(text)
            .await
            .map_err(Self::map_error)?;
        Ok(embedding.vec.into_iter().map(|v| v as f32).collect())
    }
}
