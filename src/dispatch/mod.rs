//! Reasoning dispatcher — the ReAct control loop as an explicit state machine.
//!
//! Each step makes one completion call, parses the reply into a typed
//! control step, and either finishes (`Done`), executes a tool and records
//! the observation, or feeds a format complaint back to the model. The
//! session ends `Failed` when the iteration budget runs out. Malformed
//! control tokens never crash a session; malformed tool-internal output
//! does.

pub mod prompt;

use std::sync::Arc;

use regex::Regex;

use crate::config::AssistConfig;
use crate::context::SessionContext;
use crate::error::{Error, ToolError};
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider, RetryGuard};
use crate::matcher::ContextRetriever;
use crate::records::Roster;
use crate::tools::ToolRegistry;

/// Dispatcher session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Thinking,
    ActionSelected,
    Observing,
    Done,
    Failed,
}

/// A typed tool selection parsed from the model's control output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolAction {
    pub tool: String,
    pub input: serde_json::Value,
}

/// One executed step: tool, structured input, resulting observation.
/// Kept for the session only, never persisted.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub tool: String,
    pub input: serde_json::Value,
    pub observation: String,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The model produced a final-answer marker.
    Answered(String),
    /// The iteration budget ran out without a final answer.
    Exhausted,
}

/// Full account of one session.
#[derive(Debug)]
pub struct SessionReport {
    pub context: SessionContext,
    pub outcome: SessionOutcome,
    pub transcript: Vec<ToolInvocation>,
    pub final_state: SessionState,
}

/// One parsed control step from the model.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ControlStep {
    FinalAnswer(String),
    Action(ToolAction),
    Malformed(String),
}

/// The ReAct control loop over a fixed tool registry.
pub struct ReasoningDispatcher {
    llm: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    roster: Arc<Roster>,
    retriever: Option<Arc<ContextRetriever>>,
    config: AssistConfig,
}

impl ReasoningDispatcher {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        roster: Arc<Roster>,
        retriever: Option<Arc<ContextRetriever>>,
        config: AssistConfig,
    ) -> Self {
        Self {
            llm,
            tools,
            roster,
            retriever,
            config,
        }
    }

    /// Answer a query through the full pipeline: retry-guarded session,
    /// terminal failures converted to `None`. Nothing escapes this wrapper
    /// as a raw fault.
    pub async fn answer(&self, query: &str) -> Option<String> {
        let guard = RetryGuard::new(self.config.max_retries, self.config.retry_base_delay);
        let report = guard.run(|| self.run_session(query)).await?;
        match report.outcome {
            SessionOutcome::Answered(text) => Some(text),
            SessionOutcome::Exhausted => {
                tracing::warn!(
                    session_id = %report.context.session_id,
                    steps = report.transcript.len(),
                    "Session exhausted its iteration budget without a final answer"
                );
                None
            }
        }
    }

    /// Run one reasoning session to a terminal state.
    ///
    /// Errors from tool internals (score parsing, lookups, workload
    /// coercion) and from the inference service propagate out of the
    /// session; the caller decides whether they are retryable.
    pub async fn run_session(&self, query: &str) -> Result<SessionReport, Error> {
        let ctx = SessionContext::new(query);
        tracing::info!(session_id = %ctx.session_id, query, "Session started");

        let context_block = match &self.retriever {
            Some(retriever) => {
                retriever
                    .context_for(query, self.config.context_k)
                    .await
                    .map_err(Error::from)?
            }
            None => String::new(),
        };

        let system = prompt::master_prompt(
            &self.tools.tool_definitions(),
            &self.roster,
            &context_block,
        );
        let mut messages = vec![ChatMessage::system(system), ChatMessage::user(query)];
        let mut transcript: Vec<ToolInvocation> = Vec::new();

        for step in 1..=self.config.max_iterations {
            // State: Thinking — one completion round-trip.
            let response = self
                .llm
                .complete(CompletionRequest::new(messages.clone()))
                .await?;
            let reply = response.content;

            match parse_control_reply(&reply) {
                ControlStep::FinalAnswer(answer) => {
                    tracing::info!(session_id = %ctx.session_id, step, "Session answered");
                    return Ok(SessionReport {
                        context: ctx,
                        outcome: SessionOutcome::Answered(answer),
                        transcript,
                        final_state: SessionState::Done,
                    });
                }
                ControlStep::Action(action) => {
                    // State: ActionSelected → Observing.
                    tracing::debug!(
                        session_id = %ctx.session_id,
                        step,
                        tool = %action.tool,
                        "Action selected"
                    );

                    let observation = self.observe(&action, &ctx).await?;
                    tracing::debug!(
                        session_id = %ctx.session_id,
                        step,
                        tool = %action.tool,
                        "Observation recorded"
                    );

                    transcript.push(ToolInvocation {
                        tool: action.tool,
                        input: action.input,
                        observation: observation.clone(),
                    });
                    messages.push(ChatMessage::assistant(reply));
                    messages.push(ChatMessage::user(format!("Observation: {}", observation)));
                }
                ControlStep::Malformed(reason) => {
                    // Format errors in the model's own control tokens are
                    // survivable: surface them as an observation so the
                    // reasoning can self-correct, still bounded by the
                    // iteration budget.
                    tracing::debug!(
                        session_id = %ctx.session_id,
                        step,
                        reason = %reason,
                        "Malformed control output, feeding back"
                    );
                    messages.push(ChatMessage::assistant(reply));
                    messages.push(ChatMessage::user(format!(
                        "Observation: Invalid format ({}). Reply with either \
                         'Action: <tool>' followed by 'Action Input: {{...}}', \
                         or 'Final Answer: <answer>'.",
                        reason
                    )));
                }
            }
        }

        tracing::warn!(
            session_id = %ctx.session_id,
            max_iterations = self.config.max_iterations,
            "Session failed: iteration budget exhausted"
        );
        Ok(SessionReport {
            context: ctx,
            outcome: SessionOutcome::Exhausted,
            transcript,
            final_state: SessionState::Failed,
        })
    }

    /// Execute one selected tool and produce the observation text.
    ///
    /// Unknown tools and rejected parameters come back as observations (the
    /// model can correct itself); execution failures are fatal to the
    /// session.
    async fn observe(&self, action: &ToolAction, ctx: &SessionContext) -> Result<String, Error> {
        let tool = match self.tools.get(&action.tool) {
            Some(tool) => tool,
            None => {
                return Ok(format!(
                    "Unknown tool {:?}. Available tools: {}",
                    action.tool,
                    self.tools.list().join(", ")
                ));
            }
        };

        match tool.execute(action.input.clone(), ctx).await {
            Ok(output) => Ok(output.observation),
            Err(ToolError::InvalidParameters { name, reason }) => Ok(format!(
                "Invalid input for tool {:?}: {}. Expected schema: {}",
                name,
                reason,
                tool.parameters_schema()
            )),
            Err(err) => Err(err.into()),
        }
    }
}

/// Parse one model reply into a typed control step.
fn parse_control_reply(reply: &str) -> ControlStep {
    // A final-answer marker ends the session even if earlier lines mention
    // actions the model decided against.
    static FINAL_RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let final_re = FINAL_RE.get_or_init(|| Regex::new(r"(?s)Final Answer:\s*(.+)").unwrap());
    if let Some(caps) = final_re.captures(reply) {
        return ControlStep::FinalAnswer(caps[1].trim().to_string());
    }

    static ACTION_RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let action_re =
        ACTION_RE.get_or_init(|| Regex::new(r"Action:\s*([A-Za-z_][A-Za-z0-9_]*)").unwrap());
    let Some(caps) = action_re.captures(reply) else {
        return ControlStep::Malformed("no Action or Final Answer marker".to_string());
    };
    let tool = caps[1].to_string();

    let Some(input_pos) = reply.find("Action Input:") else {
        return ControlStep::Malformed(format!("Action {:?} has no Action Input", tool));
    };
    let after_label = &reply[input_pos + "Action Input:".len()..];
    let Some(brace) = after_label.find('{') else {
        return ControlStep::Malformed("Action Input is not a JSON object".to_string());
    };

    // Parse the first JSON value and ignore anything after it; models often
    // append trailing prose.
    let mut stream =
        serde_json::Deserializer::from_str(&after_label[brace..]).into_iter::<serde_json::Value>();
    match stream.next() {
        Some(Ok(input)) if input.is_object() => ControlStep::Action(ToolAction { tool, input }),
        Some(Ok(_)) => ControlStep::Malformed("Action Input is not a JSON object".to_string()),
        _ => ControlStep::Malformed("Action Input is not valid JSON".to_string()),
    }
}
