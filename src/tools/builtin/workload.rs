//! Workload tool — committed hours for a named employee.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::context::SessionContext;
use crate::records::Roster;
use crate::tools::tool::{Tool, ToolError, ToolOutput, require_str};
use crate::workload;

pub struct WorkloadTool {
    roster: Arc<Roster>,
}

impl WorkloadTool {
    pub fn new(roster: Arc<Roster>) -> Self {
        Self { roster }
    }
}

#[async_trait]
impl Tool for WorkloadTool {
    fn name(&self) -> &str {
        "workload_calculator"
    }

    fn description(&self) -> &str {
        "Calculate the current workload (committed hours) for an employee. \
         Input format: {\"name\": \"John Doe\"}"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Exact employee name"
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &SessionContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let name = require_str(&params, "name", self.name())?;

        // Lookup misses and unparseable hours both fail the call; the
        // dispatcher treats that as fatal to the session.
        let hours = workload::workload_for(&self.roster, &name).map_err(|e| {
            ToolError::ExecutionFailed {
                name: self.name().to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(ToolOutput::text(
            format!("{} currently has {}h of active work assigned.", name, hours),
            start.elapsed(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Employee, Task};

    fn tool() -> WorkloadTool {
        let roster = Roster::new(
            vec![Employee {
                name: "Ana".to_string(),
                title: String::new(),
                skills: vec![],
            }],
            vec![Task {
                key: "A-1".to_string(),
                assignee: Some("Ana".to_string()),
                estimated_hours: "7.5".to_string(),
                ..Task::default()
            }],
        );
        WorkloadTool::new(Arc::new(roster))
    }

    #[tokio::test]
    async fn reports_committed_hours() {
        let ctx = SessionContext::new("q");
        let output = tool()
            .execute(serde_json::json!({"name": "Ana"}), &ctx)
            .await
            .unwrap();
        assert!(output.observation.contains("7.5h"));
    }

    #[tokio::test]
    async fn unknown_employee_fails_the_call() {
        let ctx = SessionContext::new("q");
        let err = tool()
            .execute(serde_json::json!({"name": "Nobody"}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed { .. }));
    }
}
