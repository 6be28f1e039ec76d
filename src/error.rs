//! Error types for PM Assist.

use std::time::Duration;

/// Top-level error type for the assistant.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

impl Error {
    /// Whether this error is a transient rate-limit failure worth retrying.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Llm(LlmError::RateLimited { .. }))
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Task/employee record errors.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Task {key} has unparseable estimated hours: {value:?}")]
    InvalidHours { key: String, value: String },

    #[error("Failed to parse employee records: {0}")]
    EmployeeParse(String),

    #[error("Failed to parse task records: {0}")]
    TaskParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// LLM and embedding provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Embedding request failed: {reason}")]
    EmbeddingFailed { reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tool execution errors.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool {name} not found")]
    NotFound { name: String },

    #[error("Tool {name} execution failed: {reason}")]
    ExecutionFailed { name: String, reason: String },

    #[error("Invalid parameters for tool {name}: {reason}")]
    InvalidParameters { name: String, reason: String },
}

/// Reasoning dispatcher errors.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Session {session_id} exhausted its iteration budget ({max_iterations} steps)")]
    IterationsExhausted {
        session_id: uuid::Uuid,
        max_iterations: u32,
    },

    #[error("Session {session_id} failed: {reason}")]
    SessionFailed {
        session_id: uuid::Uuid,
        reason: String,
    },
}

/// Result type alias for the assistant.
pub type Result<T> = std::result::Result<T, Error>;
