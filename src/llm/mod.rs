//! LLM and embedding integration for PM Assist.
//!
//! Supports:
//! - **OpenAI**: completions + embeddings via rig-core
//! - **Anthropic**: completions via rig-core (no embedding endpoint)
//!
//! rig-core handles HTTP transport; the `RigAdapter`/`RigEmbedder` bridge
//! rig's model traits to the crate's `LlmProvider`/`EmbeddingProvider`
//! contracts so every component depends on the narrow trait, never on a
//! shared global client.

pub mod provider;
pub mod retry;
mod rig_adapter;

pub use provider::*;
pub use retry::RetryGuard;
pub use rig_adapter::{RigAdapter, RigEmbedder};

use std::sync::Arc;

use rig::client::{CompletionClient, EmbeddingsClient};
use secrecy::ExposeSecret;

use crate::error::LlmError;

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAi,
    Anthropic,
}

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub backend: LlmBackend,
    pub api_key: secrecy::SecretString,
    pub model: String,
    pub embedding_model: String,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    match config.backend {
        LlmBackend::OpenAi => create_openai_provider(config),
        LlmBackend::Anthropic => create_anthropic_provider(config),
    }
}

/// Create an embedding provider from configuration.
///
/// Embeddings always come from OpenAI: Anthropic has no embedding endpoint,
/// so the same key is expected to work against the OpenAI API.
pub fn create_embedder(config: &LlmConfig) -> Result<Arc<dyn EmbeddingProvider>, LlmError> {
    use rig::providers::openai;

    let client: rig::client::Client<openai::client::OpenAIResponsesExt> =
        openai::Client::new(config.api_key.expose_secret()).map_err(|e| {
            LlmError::RequestFailed {
                provider: "openai".to_string(),
                reason: format!("Failed to create OpenAI client: {}", e),
            }
        })?;

    let model = client.embedding_model(&config.embedding_model);
    tracing::info!("Using OpenAI embeddings (model: {})", config.embedding_model);
    Ok(Arc::new(RigEmbedder::new(model)))
}

fn create_openai_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    use rig::providers::openai;

    let client: rig::client::Client<openai::client::OpenAIResponsesExt> =
        openai::Client::new(config.api_key.expose_secret()).map_err(|e| {
            LlmError::RequestFailed {
                provider: "openai".to_string(),
                reason: format!("Failed to create OpenAI client: {}", e),
            }
        })?;

    let model = client.completion_model(&config.model);
    tracing::info!("Using OpenAI (model: {})", config.model);
    Ok(Arc::new(RigAdapter::new(model, &config.model, "openai")))
}

fn create_anthropic_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    use rig::providers::anthropic;

    let client: rig::client::Client<anthropic::client::AnthropicExt> =
        anthropic::Client::new(config.api_key.expose_secret()).map_err(|e| {
            LlmError::RequestFailed {
                provider: "anthropic".to_string(),
                reason: format!("Failed to create Anthropic client: {}", e),
            }
        })?;

    let model = client.completion_model(&config.model);
    tracing::info!("Using Anthropic (model: {})", config.model);
    Ok(Arc::new(RigAdapter::new(model, &config.model, "anthropic")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_missing_key_still_constructs() {
        // rig-core clients accept any string as API key at construction time.
        // The actual auth failure happens when making a request.
        let config = LlmConfig {
            backend: LlmBackend::OpenAi,
            api_key: secrecy::SecretString::from("sk-test"),
            model: "gpt-4-turbo".to_string(),
            embedding_model: "text-embedding-3-large".to_string(),
        };
        let provider = create_provider(&config);
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().model_name(), "gpt-4-turbo");
    }

    #[test]
    fn test_create_anthropic_provider() {
        let config = LlmConfig {
            backend: LlmBackend::Anthropic,
            api_key: secrecy::SecretString::from("sk-ant-test"),
            model: "claude-sonnet-4-20250514".to_string(),
            embedding_model: "text-embedding-3-large".to_string(),
        };
        let provider = create_provider(&config);
        assert!(provider.is_ok());
    }

    #[test]
    fn test_create_embedder() {
        let config = LlmConfig {
            backend: LlmBackend::OpenAi,
            api_key: secrecy::SecretString::from("sk-test"),
            model: "gpt-4-turbo".to_string(),
            embedding_model: "text-embedding-3-large".to_string(),
        };
        assert!(create_embedder(&config).is_ok());
    }
}
