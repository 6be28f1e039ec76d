//! Master prompt for the reasoning dispatcher.

use crate::records::Roster;
use crate::tools::ToolDefinition;

/// Render the dispatcher's system prompt: role, control grammar, tool
/// catalog, and the task/employee snapshot (plus retrieved context).
pub fn master_prompt(tools: &[ToolDefinition], roster: &Roster, context: &str) -> String {
    let tool_names = tools
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let tool_descriptions = tools
        .iter()
        .map(|t| format!("- {}: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    let team = serde_json::to_string_pretty(&roster.employees).unwrap_or_default();
    let projects = serde_json::to_string_pretty(&roster.tasks).unwrap_or_default();

    let retrieved = if context.is_empty() {
        String::new()
    } else {
        format!("### Retrieved Context\n{}\n\n", context)
    };

    format!(
        "You are an AI Project Management Assistant that follows the ReAct reasoning framework.\n\n\
         Only refer to employees and tasks that appear in the context below. Never fabricate \
         new employees or tasks. If you do not have enough information, say so.\n\n\
         **Available Tools:**\n{tool_descriptions}\n\n\
         ### Format\n\
         Thought: think step by step before taking action.\n\
         Action: one tool from [{tool_names}]\n\
         Action Input: {{\"param\": \"value\"}} (valid JSON)\n\
         Observation: the result of the action (supplied to you).\n\
         ... (repeat Thought / Action / Action Input / Observation as needed)\n\
         Thought: I now have enough information.\n\
         Final Answer: the answer to the original question.\n\n\
         {retrieved}\
         ### Team Members\n{team}\n\n\
         ### Current Projects\n{projects}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Employee;

    #[test]
    fn prompt_lists_tools_and_team() {
        let tools = vec![ToolDefinition {
            name: "skill_matcher".to_string(),
            description: "Find employees with specific skills.".to_string(),
            parameters: serde_json::json!({}),
        }];
        let roster = Roster::new(
            vec![Employee {
                name: "Ana".to_string(),
                title: "Dev".to_string(),
                skills: vec!["Python".to_string()],
            }],
            vec![],
        );
        let prompt = master_prompt(&tools, &roster, "snippet");
        assert!(prompt.contains("skill_matcher"));
        assert!(prompt.contains("Ana"));
        assert!(prompt.contains("Final Answer:"));
        assert!(prompt.contains("snippet"));
    }
}
