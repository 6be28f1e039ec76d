//! Priority tool — classify a task's urgency.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::agents::PriorityClassifier;
use crate::context::SessionContext;
use crate::records::Roster;
use crate::tools::tool::{Tool, ToolError, ToolOutput, require_str};
use crate::workload;

pub struct PrioritizeTaskTool {
    classifier: Arc<PriorityClassifier>,
    roster: Arc<Roster>,
}

impl PrioritizeTaskTool {
    pub fn new(classifier: Arc<PriorityClassifier>, roster: Arc<Roster>) -> Self {
        Self { classifier, roster }
    }
}

#[async_trait]
impl Tool for PrioritizeTaskTool {
    fn name(&self) -> &str {
        "task_prioritizer"
    }

    fn description(&self) -> &str {
        "Classify a task's priority (High/Medium/Low) from its due date, \
         effort, dependencies, and the assignee's workload. \
         Input format: {\"task_key\": \"PN2-53\"}"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "task_key": {
                    "type": "string",
                    "description": "Key of the task to prioritize"
                }
            },
            "required": ["task_key"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &SessionContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let task_key = require_str(&params, "task_key", self.name())?;

        let task = self
            .roster
            .task(&task_key)
            .map_err(|e| ToolError::ExecutionFailed {
                name: self.name().to_string(),
                reason: e.to_string(),
            })?;

        // An unassigned task carries no committed hours.
        let hours = match task.assignee.as_deref() {
            Some(assignee) => workload::workload_for(&self.roster, assignee).map_err(|e| {
                ToolError::ExecutionFailed {
                    name: self.name().to_string(),
                    reason: e.to_string(),
                }
            })?,
            None => 0.0,
        };

        let result = self
            .classifier
            .prioritize(task, hours)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                name: self.name().to_string(),
                reason: e.to_string(),
            })?;

        Ok(ToolOutput::text(result.to_string(), start.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::llm::{CompletionRequest, CompletionResponse, LlmProvider};
    use crate::records::{Employee, Task};

    struct HighPriority;

    #[async_trait]
    impl LlmProvider for HighPriority {
        fn model_name(&self) -> &str {
            "mock"
        }
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            // Echo the workload into the reasoning so tests can see it.
            let prompt = &request.messages.last().unwrap().content;
            let workload_line = prompt
                .lines()
                .find(|l| l.contains("Workload"))
                .unwrap_or("")
                .to_string();
            Ok(CompletionResponse {
                content: format!("Priority: High\nReasoning: {}", workload_line),
            })
        }
    }

    fn tool() -> PrioritizeTaskTool {
        let roster = Arc::new(Roster::new(
            vec![Employee {
                name: "Ana".to_string(),
                title: String::new(),
                skills: vec![],
            }],
            vec![
                Task {
                    key: "PN2-53".to_string(),
                    assignee: Some("Ana".to_string()),
                    due_date: "2025-03-01".to_string(),
                    estimated_hours: "12".to_string(),
                    ..Task::default()
                },
                Task {
                    key: "PN2-54".to_string(),
                    assignee: Some("Ana".to_string()),
                    estimated_hours: "8".to_string(),
                    ..Task::default()
                },
            ],
        ));
        PrioritizeTaskTool::new(
            Arc::new(PriorityClassifier::new(Arc::new(HighPriority))),
            roster,
        )
    }

    #[tokio::test]
    async fn classifies_with_assignee_workload() {
        let ctx = SessionContext::new("q");
        let output = tool()
            .execute(serde_json::json!({"task_key": "PN2-53"}), &ctx)
            .await
            .unwrap();
        assert!(output.observation.contains("Priority: High"));
        // Ana's active workload is 12 + 8 = 20h.
        assert!(output.observation.contains("20h"));
    }

    #[tokio::test]
    async fn unknown_task_fails_the_call() {
        let ctx = SessionContext::new("q");
        let err = tool()
            .execute(serde_json::json!({"task_key": "PN2-99"}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed { .. }));
    }
}
