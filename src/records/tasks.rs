//! Task record parsing — block export format and JSON mode.

use crate::error::RecordError;
use crate::records::model::Task;

/// Separator between task blocks in the export format.
const BLOCK_SEPARATOR: &str = "----------------------------------------";

/// Parse tasks from the `Key: value` block export format.
///
/// Blocks are separated by a dashed line. `Acceptance Criteria` collects all
/// following lines until the next recognized field. A block in which no
/// recognized field is non-empty is dropped.
pub fn parse_task_blocks(content: &str) -> Vec<Task> {
    content
        .trim()
        .split(BLOCK_SEPARATOR)
        .filter_map(parse_block)
        .collect()
}

/// Parse tasks from the alternate JSON export (an array of task objects).
pub fn parse_tasks_json(content: &str) -> Result<Vec<Task>, RecordError> {
    serde_json::from_str(content).map_err(|e| RecordError::TaskParse(e.to_string()))
}

fn parse_block(block: &str) -> Option<Task> {
    let mut task = Task::default();
    let mut in_criteria = false;
    let mut criteria: Vec<String> = Vec::new();
    let mut any_field = false;

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(value) = field_value(line, "Key:") {
            task.key = value;
            in_criteria = false;
        } else if let Some(value) = field_value(line, "Issue Type:") {
            task.issue_type = value;
            in_criteria = false;
        } else if let Some(value) = field_value(line, "Summary:") {
            task.summary = value;
            in_criteria = false;
        } else if let Some(value) = field_value(line, "Description:") {
            task.description = value;
            in_criteria = false;
        } else if line.starts_with("Acceptance Criteria") {
            in_criteria = true;
        } else if let Some(value) = field_value(line, "Status:") {
            task.status = value;
            in_criteria = false;
        } else if let Some(value) = field_value(line, "Assignee:") {
            task.assignee = Some(value).filter(|v| !v.is_empty());
            in_criteria = false;
        } else if let Some(value) = field_value(line, "Due Date:") {
            task.due_date = value;
            in_criteria = false;
        } else if let Some(value) = field_value(line, "Start Date:") {
            task.start_date = value;
            in_criteria = false;
        } else if let Some(value) = field_value(line, "Completed Date:") {
            task.completed_date = value;
            in_criteria = false;
        } else if let Some(value) = field_value(line, "Estimated Hours:") {
            task.estimated_hours = value;
            in_criteria = false;
        } else if let Some(value) = field_value(line, "Parent:") {
            task.parent = Some(value).filter(|v| !v.is_empty());
            in_criteria = false;
        } else if let Some(value) =
            field_value(line, "Required Skills:").or_else(|| field_value(line, "Skills:"))
        {
            task.required_skills = split_skills(&value);
            in_criteria = false;
        } else if in_criteria {
            criteria.push(line.to_string());
            continue;
        } else {
            // Unrecognized line outside acceptance criteria — ignored.
            continue;
        }
        any_field = true;
    }

    task.acceptance_criteria = criteria.join("\n");
    if !task.acceptance_criteria.is_empty() {
        any_field = true;
    }

    if any_field { Some(task) } else { None }
}

fn field_value(line: &str, prefix: &str) -> Option<String> {
    line.strip_prefix(prefix).map(|rest| rest.trim().to_string())
}

fn split_skills(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Key: PN2-53
Issue Type: Story
Summary: Build login page
Description: Implement the login flow
Acceptance Criteria:
User can log in
Errors are shown inline
Status: In Progress
Assignee: Jalin Solankee
Due Date: 2025-03-01
Estimated Hours: 12
Parent: PN2-50
Required Skills: React, TypeScript
----------------------------------------
Key: PN2-54
Summary: Fix flaky test
Estimated Hours: 2
----------------------------------------

random noise that matches no field
";

    #[test]
    fn parses_blocks_and_drops_unrecognized() {
        let tasks = parse_task_blocks(SAMPLE);
        assert_eq!(tasks.len(), 2);

        let first = &tasks[0];
        assert_eq!(first.key, "PN2-53");
        assert_eq!(first.issue_type, "Story");
        assert_eq!(
            first.acceptance_criteria,
            "User can log in\nErrors are shown inline"
        );
        assert_eq!(first.assignee.as_deref(), Some("Jalin Solankee"));
        assert_eq!(first.estimated_hours, "12");
        assert_eq!(first.parent.as_deref(), Some("PN2-50"));
        assert_eq!(first.required_skills, vec!["React", "TypeScript"]);

        let second = &tasks[1];
        assert_eq!(second.key, "PN2-54");
        assert!(second.assignee.is_none());
    }

    #[test]
    fn acceptance_criteria_stop_at_next_field() {
        let block = "Key: X-1\nAcceptance Criteria:\nline one\nStatus: Done\n";
        let tasks = parse_task_blocks(block);
        assert_eq!(tasks[0].acceptance_criteria, "line one");
        assert_eq!(tasks[0].status, "Done");
    }

    #[test]
    fn empty_input_yields_no_tasks() {
        assert!(parse_task_blocks("").is_empty());
        assert!(parse_task_blocks("\n\n").is_empty());
    }

    #[test]
    fn json_mode_parses_array() {
        let tasks = parse_tasks_json(
            r#"[
                {"Key": "PN2-1", "Summary": "A", "EstimatedHours": "4"},
                {"Key": "PN2-2", "Summary": "B", "EstimatedHours": 6}
            ]"#,
        )
        .unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].estimated_hours, "6");
    }

    #[test]
    fn json_mode_rejects_malformed() {
        assert!(parse_tasks_json("{not json").is_err());
    }
}
