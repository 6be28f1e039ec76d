//! In-memory record model — employees, tasks, and the roster snapshot.

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// A team member. Constructed once from the employee record set; immutable
/// for the duration of a reasoning session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Title", default)]
    pub title: String,
    #[serde(alias = "Skills", default)]
    pub skills: Vec<String>,
}

impl Employee {
    /// Text snippet used for embedding: `"name: skill, skill, …"`.
    pub fn skill_snippet(&self) -> String {
        format!("{}: {}", self.name, self.skills.join(", "))
    }

    /// Longer snippet used for context retrieval.
    pub fn context_snippet(&self) -> String {
        format!(
            "[EMPLOYEE]\nEmployee Name: {}\nTitle: {}\nSkills: {}\n",
            self.name,
            self.title,
            self.skills.join(", ")
        )
    }
}

/// A project task. Estimated hours stay as the raw record string; numeric
/// coercion happens in the workload calculator, where a bad value is a
/// propagated error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(alias = "Key")]
    pub key: String,
    #[serde(alias = "IssueType", alias = "Issue Type", default)]
    pub issue_type: String,
    #[serde(alias = "Summary", default)]
    pub summary: String,
    #[serde(alias = "Description", default)]
    pub description: String,
    #[serde(
        alias = "AcceptanceCriteria",
        alias = "Acceptance Criteria",
        default,
        deserialize_with = "string_or_lines"
    )]
    pub acceptance_criteria: String,
    #[serde(alias = "Status", default)]
    pub status: String,
    #[serde(alias = "Assignee", default, deserialize_with = "non_empty_string")]
    pub assignee: Option<String>,
    #[serde(alias = "DueDate", alias = "Due Date", default)]
    pub due_date: String,
    #[serde(alias = "StartDate", alias = "Start Date", default)]
    pub start_date: String,
    #[serde(alias = "CompletedDate", alias = "Completed Date", default)]
    pub completed_date: String,
    #[serde(
        alias = "EstimatedHours",
        alias = "Estimated Hours",
        default,
        deserialize_with = "string_or_number"
    )]
    pub estimated_hours: String,
    #[serde(alias = "Parent", default, deserialize_with = "non_empty_string")]
    pub parent: Option<String>,
    #[serde(alias = "RequiredSkills", alias = "Required Skills", default)]
    pub required_skills: Vec<String>,
}

impl Task {
    /// A task is active until it has a completed date.
    pub fn is_active(&self) -> bool {
        self.completed_date.trim().is_empty()
    }

    /// Parse the estimated-hours field. Empty counts as unparseable — the
    /// caller decides whether that is fatal.
    pub fn parsed_hours(&self) -> Result<f64, RecordError> {
        self.estimated_hours
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|h| *h >= 0.0)
            .ok_or_else(|| RecordError::InvalidHours {
                key: self.key.clone(),
                value: self.estimated_hours.clone(),
            })
    }

    /// Text snippet used for context retrieval.
    pub fn context_snippet(&self) -> String {
        format!(
            "[TASK]\nKey: {}\nSummary: {}\nRequired Skills: {}\nDescription: {}\nAcceptance Criteria: {}\nStatus: {}\nAssignee: {}\nDue Date: {}\nEstimated Hours: {}\nParent: {}\n",
            self.key,
            self.summary,
            self.required_skills.join(", "),
            self.description,
            self.acceptance_criteria,
            self.status,
            self.assignee.as_deref().unwrap_or(""),
            self.due_date,
            self.estimated_hours,
            self.parent.as_deref().unwrap_or("None"),
        )
    }
}

/// Immutable snapshot of all employees and tasks for a session.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub employees: Vec<Employee>,
    pub tasks: Vec<Task>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>, tasks: Vec<Task>) -> Self {
        Self { employees, tasks }
    }

    /// Look up an employee by name. A miss is a typed error, never a
    /// synthesized fallback.
    pub fn employee(&self, name: &str) -> Result<&Employee, RecordError> {
        self.employees
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| RecordError::UnknownEmployee(name.to_string()))
    }

    /// Look up a task by key.
    pub fn task(&self, key: &str) -> Result<&Task, RecordError> {
        self.tasks
            .iter()
            .find(|t| t.key == key)
            .ok_or_else(|| RecordError::UnknownTask(key.to_string()))
    }

    /// Tasks currently assigned to an employee and not yet completed.
    pub fn active_tasks_for(&self, name: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.assignee.as_deref() == Some(name) && t.is_active())
            .collect()
    }
}

// ── Serde helpers ───────────────────────────────────────────────────

/// Accept either a string or a number for hours fields in JSON records.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accept either a string or an array of lines (the JSON export stores
/// acceptance criteria as an array).
fn string_or_lines<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    })
}

/// Treat `""` and `null` as absent.
fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(key: &str, assignee: Option<&str>, hours: &str, completed: &str) -> Task {
        Task {
            key: key.to_string(),
            assignee: assignee.map(String::from),
            estimated_hours: hours.to_string(),
            completed_date: completed.to_string(),
            ..Task::default()
        }
    }

    #[test]
    fn lookup_miss_is_an_error() {
        let roster = Roster::default();
        assert!(matches!(
            roster.employee("Nobody"),
            Err(RecordError::UnknownEmployee(_))
        ));
        assert!(matches!(
            roster.task("PN2-99"),
            Err(RecordError::UnknownTask(_))
        ));
    }

    #[test]
    fn active_tasks_exclude_completed() {
        let roster = Roster::new(
            vec![],
            vec![
                task("A-1", Some("Jalin"), "5", ""),
                task("A-2", Some("Jalin"), "3", "2025-01-10"),
                task("A-3", Some("Maya"), "8", ""),
            ],
        );
        let active = roster.active_tasks_for("Jalin");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].key, "A-1");
    }

    #[test]
    fn parsed_hours_rejects_garbage_and_negatives() {
        assert!(task("A-1", None, "abc", "").parsed_hours().is_err());
        assert!(task("A-1", None, "", "").parsed_hours().is_err());
        assert!(task("A-1", None, "-2", "").parsed_hours().is_err());
        assert_eq!(task("A-1", None, "3.5", "").parsed_hours().unwrap(), 3.5);
    }

    #[test]
    fn skill_snippet_format() {
        let e = Employee {
            name: "Jalin".to_string(),
            title: "Engineer".to_string(),
            skills: vec!["Python".to_string(), "React".to_string()],
        };
        assert_eq!(e.skill_snippet(), "Jalin: Python, React");
    }

    #[test]
    fn json_task_accepts_numeric_hours_and_array_criteria() {
        let t: Task = serde_json::from_str(
            r#"{
                "Key": "PN2-53",
                "Summary": "Build API",
                "EstimatedHours": 12.5,
                "AcceptanceCriteria": ["works", "tested"],
                "Assignee": "",
                "RequiredSkills": ["Python"]
            }"#,
        )
        .unwrap();
        assert_eq!(t.estimated_hours, "12.5");
        assert_eq!(t.acceptance_criteria, "works\ntested");
        assert!(t.assignee.is_none());
        assert_eq!(t.required_skills, vec!["Python"]);
    }
}
