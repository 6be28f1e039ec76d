//! Skill-match tool — shortlist employees by skill similarity.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::context::SessionContext;
use crate::matcher::SkillMatcher;
use crate::tools::tool::{Tool, ToolError, ToolOutput, require_str_list};

pub struct SkillMatchTool {
    matcher: Arc<SkillMatcher>,
    default_k: usize,
}

impl SkillMatchTool {
    pub fn new(matcher: Arc<SkillMatcher>, default_k: usize) -> Self {
        Self { matcher, default_k }
    }
}

#[async_trait]
impl Tool for SkillMatchTool {
    fn name(&self) -> &str {
        "skill_matcher"
    }

    fn description(&self) -> &str {
        "Find employees with specific skills, ordered by similarity. \
         Input format: {\"skills\": [\"Python\", \"ML\"]}"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "skills": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Required skill labels to match against"
                },
                "k": {
                    "type": "integer",
                    "description": "How many candidates to return"
                }
            },
            "required": ["skills"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &SessionContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let skills = require_str_list(&params, "skills", self.name())?;
        let k = params
            .get("k")
            .and_then(|v| v.as_u64())
            .map(|k| k as usize)
            .unwrap_or(self.default_k);

        let matches =
            self.matcher
                .find_match(&skills, k)
                .await
                .map_err(|e| ToolError::ExecutionFailed {
                    name: self.name().to_string(),
                    reason: e.to_string(),
                })?;

        Ok(ToolOutput::json(
            &serde_json::Value::Array(matches),
            start.elapsed(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::llm::EmbeddingProvider;
    use crate::records::{Employee, Roster};

    struct FlatEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FlatEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    async fn tool() -> SkillMatchTool {
        let roster = Roster::new(
            vec![Employee {
                name: "Ana".to_string(),
                title: String::new(),
                skills: vec!["Python".to_string()],
            }],
            vec![],
        );
        let matcher = SkillMatcher::build(Arc::new(FlatEmbedder), &roster)
            .await
            .unwrap();
        SkillMatchTool::new(Arc::new(matcher), 3)
    }

    #[tokio::test]
    async fn returns_candidates_as_json() {
        let tool = tool().await;
        let ctx = SessionContext::new("q");
        let output = tool
            .execute(serde_json::json!({"skills": ["Python"]}), &ctx)
            .await
            .unwrap();
        assert!(output.observation.contains("Ana"));
    }

    #[tokio::test]
    async fn missing_skills_is_invalid_parameters() {
        let tool = tool().await;
        let ctx = SessionContext::new("q");
        let err = tool.execute(serde_json::json!({}), &ctx).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters { .. }));
    }
}
