//! Tool abstraction — the callable units the dispatcher sequences.

use std::time::Duration;

use async_trait::async_trait;

use crate::context::SessionContext;
pub use crate::error::ToolError;

/// Output of a tool execution. The observation text is what the reasoning
/// loop sees on the next step.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub observation: String,
    pub duration: Duration,
}

impl ToolOutput {
    pub fn text(observation: impl Into<String>, duration: Duration) -> Self {
        Self {
            observation: observation.into(),
            duration,
        }
    }

    pub fn json(value: &serde_json::Value, duration: Duration) -> Self {
        Self {
            observation: serde_json::to_string_pretty(value)
                .unwrap_or_else(|_| value.to_string()),
            duration,
        }
    }
}

/// Description of a tool as presented to the model.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A tool the dispatcher can select.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name.
    fn name(&self) -> &str;

    /// What the tool does, shown in the dispatch prompt.
    fn description(&self) -> &str;

    /// JSON schema of the structured input.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute with a single structured input.
    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: &SessionContext,
    ) -> Result<ToolOutput, ToolError>;
}

// ── Parameter helpers ───────────────────────────────────────────────

/// Extract a required string parameter.
pub fn require_str(params: &serde_json::Value, key: &str, tool: &str) -> Result<String, ToolError> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(String::from)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ToolError::InvalidParameters {
            name: tool.to_string(),
            reason: format!("missing required string parameter {:?}", key),
        })
}

/// Extract a required list-of-strings parameter. A bare string is accepted
/// and split on commas, since models frequently send `"a, b"` for lists.
pub fn require_str_list(
    params: &serde_json::Value,
    key: &str,
    tool: &str,
) -> Result<Vec<String>, ToolError> {
    let value = params.get(key).ok_or_else(|| ToolError::InvalidParameters {
        name: tool.to_string(),
        reason: format!("missing required parameter {:?}", key),
    })?;

    let items: Vec<String> = match value {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        serde_json::Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    };

    if items.is_empty() {
        return Err(ToolError::InvalidParameters {
            name: tool.to_string(),
            reason: format!("parameter {:?} must be a non-empty list of strings", key),
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_str_rejects_missing_and_empty() {
        let params = serde_json::json!({"name": "Ana", "blank": "  "});
        assert_eq!(require_str(&params, "name", "t").unwrap(), "Ana");
        assert!(require_str(&params, "missing", "t").is_err());
        assert!(require_str(&params, "blank", "t").is_err());
    }

    #[test]
    fn require_str_list_accepts_array_or_csv() {
        let params = serde_json::json!({
            "a": ["Python", "React"],
            "b": "Python, React",
            "c": [],
        });
        assert_eq!(
            require_str_list(&params, "a", "t").unwrap(),
            vec!["Python", "React"]
        );
        assert_eq!(
            require_str_list(&params, "b", "t").unwrap(),
            vec!["Python", "React"]
        );
        assert!(require_str_list(&params, "c", "t").is_err());
        assert!(require_str_list(&params, "missing", "t").is_err());
    }
}
