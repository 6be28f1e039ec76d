//! Allocation tool — pick the best employee for a task.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::agents::AllocationScorer;
use crate::context::SessionContext;
use crate::records::Roster;
use crate::tools::tool::{Tool, ToolError, ToolOutput, require_str};

pub struct AllocateTaskTool {
    scorer: Arc<AllocationScorer>,
    roster: Arc<Roster>,
}

impl AllocateTaskTool {
    pub fn new(scorer: Arc<AllocationScorer>, roster: Arc<Roster>) -> Self {
        Self { scorer, roster }
    }
}

#[async_trait]
impl Tool for AllocateTaskTool {
    fn name(&self) -> &str {
        "task_allocator"
    }

    fn description(&self) -> &str {
        "Allocate a task to the best-matching employee based on skills and \
         availability. Input format: {\"task_key\": \"PN2-53\"}"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "task_key": {
                    "type": "string",
                    "description": "Key of the task to allocate"
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

        let result = self
            .scorer
            .allocate(task, &self.roster)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                name: self.name().to_string(),
                reason: e.to_string(),
            })?;

        Ok(ToolOutput::text(result.to_string(), start.elapsed()))
    }
}
