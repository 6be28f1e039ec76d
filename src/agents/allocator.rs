//! Allocation scoring — per-candidate model calls, best match wins.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, LlmError};
use crate::llm::{CompletionRequest, LlmProvider};
use crate::records::{Roster, Task};
use crate::workload;

/// The winning candidate for one allocation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationResult {
    pub employee: String,
    /// Match score in [0, 100].
    pub score: u8,
}

impl fmt::Display for AllocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recommended: {} | Match Score: {}%",
            self.employee, self.score
        )
    }
}

/// Scores a task against every roster employee, one inference call per
/// candidate, and keeps the running best.
///
/// Latency is O(roster) sequential round-trips. That cost profile is part of
/// the contract: candidates are scored in roster order and the ordering
/// decides ties.
pub struct AllocationScorer {
    llm: Arc<dyn LlmProvider>,
    weekly_capacity_hours: f64,
}

impl AllocationScorer {
    pub fn new(llm: Arc<dyn LlmProvider>, weekly_capacity_hours: f64) -> Self {
        Self {
            llm,
            weekly_capacity_hours,
        }
    }

    /// Pick the best-matching employee for `task`.
    ///
    /// Selection policy: the first candidate becomes the provisional winner;
    /// a later candidate replaces it only on a strictly greater score, so
    /// ties keep the earliest-seen employee.
    pub async fn allocate(&self, task: &Task, roster: &Roster) -> Result<AllocationResult, Error> {
        if roster.employees.is_empty() {
            return Err(LlmError::InvalidResponse {
                provider: self.llm.model_name().to_string(),
                reason: "cannot allocate against an empty roster".to_string(),
            }
            .into());
        }

        let mut best: Option<AllocationResult> = None;

        for employee in &roster.employees {
            let committed = workload::workload_for(roster, &employee.name)?;
            let availability = self.weekly_capacity_hours - committed;

            let prompt = format!(
                "Consider:\n\
                 - Required Skills: {}\n\
                 - Employee: {}\n\
                 - Employee Skills: {}\n\
                 - Availability: {}h/week\n\n\
                 Rate how well this employee matches the task.\n\
                 Reply with exactly one line in the format:\n\
                 {} | <0-100>%",
                task.required_skills.join(", "),
                employee.name,
                employee.skills.join(", "),
                availability,
                employee.name,
            );

            let response = self
                .llm
                .complete(CompletionRequest::from_prompt(prompt))
                .await?;
            let (name, score) = parse_allocation_reply(&response.content).map_err(|reason| {
                LlmError::InvalidResponse {
                    provider: self.llm.model_name().to_string(),
                    reason,
                }
            })?;

            tracing::debug!(employee = %name, score, availability, "Scored candidate");

            let replaces = best.as_ref().map(|b| score > b.score).unwrap_or(true);
            if replaces {
                best = Some(AllocationResult {
                    employee: name,
                    score,
                });
            }
        }

        // Non-empty roster guarantees a winner.
        Ok(best.expect("roster checked non-empty"))
    }
}

/// Parse a `name | NN%` scoring reply.
///
/// The response contract is a name and an integer percentage separated by a
/// pipe. Anything else is a typed failure the caller must handle — there is
/// no local retry.
pub fn parse_allocation_reply(reply: &str) -> Result<(String, u8), String> {
    let line = reply
        .lines()
        .map(str::trim)
        .find(|l| l.contains('|'))
        .ok_or_else(|| format!("no 'name | score%' line in reply: {:?}", reply))?;

    let (name_part, score_part) = line
        .split_once('|')
        .ok_or_else(|| format!("missing delimiter in reply line: {:?}", line))?;

    let name = name_part
        .trim()
        .trim_start_matches("Recommendation:")
        .trim_start_matches("Recommended:")
        .trim()
        .to_string();
    if name.is_empty() {
        return Err(format!("empty candidate name in reply line: {:?}", line));
    }

    let score_text = score_part
        .trim()
        .trim_start_matches("Match Score:")
        .trim()
        .trim_end_matches('%');
    let score: u8 = score_text
        .parse()
        .map_err(|_| format!("unparseable score {:?} in reply line: {:?}", score_text, line))?;
    if score > 100 {
        return Err(format!("score {} out of range [0, 100]", score));
    }

    Ok((name, score))
}
