//! Deadline-aware priority classification.

use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::llm::{CompletionRequest, LlmProvider};
use crate::records::Task;

/// The recognized priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// Match a label against the known levels, ignoring case and brackets.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().trim_matches(['[', ']']).to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Classification output: the level text exactly as the model produced it,
/// plus its reasoning. The level is deliberately not constrained to
/// `PriorityLevel` — unexpected labels pass through verbatim and are only
/// logged, so callers see model drift instead of a silently coerced value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityResult {
    pub level: String,
    pub reasoning: String,
}

impl PriorityResult {
    /// The level as a recognized enum value, if it is one.
    pub fn recognized_level(&self) -> Option<PriorityLevel> {
        PriorityLevel::from_label(&self.level)
    }
}

impl fmt::Display for PriorityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Priority: {}\nReasoning: {}", self.level, self.reasoning)
    }
}

/// Classifies a task's urgency from its deadline, effort, dependencies, and
/// the assignee's committed hours. One inference call per classification.
pub struct PriorityClassifier {
    llm: Arc<dyn LlmProvider>,
}

impl PriorityClassifier {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    pub async fn prioritize(&self, task: &Task, workload: f64) -> Result<PriorityResult, Error> {
        let prompt = format!(
            "Analyze task deadlines considering:\n\
             - Due Date: {}\n\
             - Estimated Hours: {}\n\
             - Dependencies: {}\n\
             - Assignee's Current Workload: {}h\n\n\
             Output format:\n\
             Priority: [High/Medium/Low]\n\
             Reasoning: [analysis]",
            task.due_date,
            task.estimated_hours,
            task.parent.as_deref().unwrap_or("None"),
            workload,
        );

        let response = self
            .llm
            .complete(CompletionRequest::from_prompt(prompt))
            .await?;

        let result = parse_priority_reply(&response.content);
        if result.recognized_level().is_none() {
            tracing::warn!(
                task = %task.key,
                level = %result.level,
                "Priority level outside High/Medium/Low, passing through verbatim"
            );
        }
        Ok(result)
    }
}

/// Extract the `Priority:` and `Reasoning:` labeled fields.
///
/// A reply without a `Priority:` label keeps its full text as the reasoning
/// and an empty level, so nothing the model said is lost.
pub fn parse_priority_reply(reply: &str) -> PriorityResult {
    let mut level = String::new();
    let mut reasoning_lines: Vec<&str> = Vec::new();
    let mut saw_priority = false;

    for line in reply.lines() {
        let trimmed = line.trim().trim_matches('`');
        if let Some(value) = trimmed.strip_prefix("Priority:") {
            level = value.trim().trim_matches(['[', ']']).to_string();
            saw_priority = true;
        } else if let Some(value) = trimmed.strip_prefix("Reasoning:") {
            reasoning_lines.push(value.trim());
        } else if !trimmed.is_empty() && (saw_priority || !reasoning_lines.is_empty()) {
            reasoning_lines.push(trimmed);
        }
    }

    if !saw_priority {
        return PriorityResult {
            level: String::new(),
            reasoning: reply.trim().to_string(),
        };
    }

    PriorityResult {
        level,
        reasoning: reasoning_lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use async_trait::async_trait;

    struct FixedReply(&'static str);

    #[async_trait]
    impl LlmProvider for FixedReply {
        fn model_name(&self) -> &str {
            "mock"
        }
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<crate::llm::CompletionResponse, LlmError> {
            Ok(crate::llm::CompletionResponse {
                content: self.0.to_string(),
            })
        }
    }

    fn task() -> Task {
        Task {
            key: "PN2-7".to_string(),
            due_date: "2025-03-01".to_string(),
            estimated_hours: "12".to_string(),
            parent: Some("PN2-5".to_string()),
            ..Task::default()
        }
    }

    #[tokio::test]
    async fn parses_labeled_reply() {
        let classifier = PriorityClassifier::new(Arc::new(FixedReply(
            "Priority: High\nReasoning: Due in two days with a heavy workload.",
        )));
        let result = classifier.prioritize(&task(), 32.0).await.unwrap();
        assert_eq!(result.level, "High");
        assert_eq!(result.recognized_level(), Some(PriorityLevel::High));
        assert!(result.reasoning.contains("two days"));
    }

    #[tokio::test]
    async fn unknown_level_passes_through_verbatim() {
        let classifier = PriorityClassifier::new(Arc::new(FixedReply(
            "Priority: Critical\nReasoning: On fire.",
        )));
        let result = classifier.prioritize(&task(), 0.0).await.unwrap();
        assert_eq!(result.level, "Critical");
        assert_eq!(result.recognized_level(), None);
    }

    #[test]
    fn reply_without_labels_keeps_full_text() {
        let result = parse_priority_reply("This task seems urgent to me.");
        assert!(result.level.is_empty());
        assert_eq!(result.reasoning, "This task seems urgent to me.");
    }

    #[test]
    fn bracketed_level_is_unwrapped() {
        let result = parse_priority_reply("Priority: [Medium]\nReasoning: Steady pace works.");
        assert_eq!(result.level, "Medium");
        assert_eq!(result.recognized_level(), Some(PriorityLevel::Medium));
    }

    #[test]
    fn multi_line_reasoning_is_collected() {
        let result = parse_priority_reply(
            "Priority: Low\nReasoning: No deadline pressure.\nAssignee has spare capacity.",
        );
        assert_eq!(
            result.reasoning,
            "No deadline pressure.\nAssignee has spare capacity."
        );
    }

    #[test]
    fn from_label_is_case_insensitive() {
        assert_eq!(PriorityLevel::from_label("high"), Some(PriorityLevel::High));
        assert_eq!(PriorityLevel::from_label("[Low]"), Some(PriorityLevel::Low));
        assert_eq!(PriorityLevel::from_label("urgent"), None);
    }
}
