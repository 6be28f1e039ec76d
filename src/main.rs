use std::sync::Arc;

use anyhow::Context;

use pm_assist::agents::{AllocationScorer, PriorityClassifier};
use pm_assist::config::AssistConfig;
use pm_assist::dispatch::ReasoningDispatcher;
use pm_assist::llm::{LlmBackend, LlmConfig, create_embedder, create_provider};
use pm_assist::matcher::{ContextRetriever, SkillMatcher};
use pm_assist::records::{Roster, parse_employees, parse_task_blocks, parse_tasks_json};
use pm_assist::shell::Shell;
use pm_assist::tools::ToolRegistry;
use pm_assist::tools::builtin::{AllocateTaskTool, PrioritizeTaskTool, SkillMatchTool, WorkloadTool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let backend = match std::env::var("PM_ASSIST_BACKEND").as_deref() {
        Ok("anthropic") => LlmBackend::Anthropic,
        _ => LlmBackend::OpenAi,
    };

    let key_var = match backend {
        LlmBackend::OpenAi => "OPENAI_API_KEY",
        LlmBackend::Anthropic => "ANTHROPIC_API_KEY",
    };
    let api_key = std::env::var(key_var).unwrap_or_else(|_| {
        eprintln!("Error: {} not set", key_var);
        eprintln!("  export {}=sk-...", key_var);
        std::process::exit(1);
    });

    let model = std::env::var("PM_ASSIST_MODEL").unwrap_or_else(|_| "gpt-4-turbo".to_string());
    let embedding_model = std::env::var("PM_ASSIST_EMBED_MODEL")
        .unwrap_or_else(|_| "text-embedding-3-large".to_string());

    let tasks_path =
        std::env::var("PM_ASSIST_TASKS").unwrap_or_else(|_| "./data/tasks.txt".to_string());
    let employees_path = std::env::var("PM_ASSIST_EMPLOYEES")
        .unwrap_or_else(|_| "./data/employees.json".to_string());

    eprintln!("📋 PM Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", model);
    eprintln!("   Embeddings: {}", embedding_model);
    eprintln!("   Tasks: {}", tasks_path);
    eprintln!("   Employees: {}", employees_path);
    eprintln!("   Type a question and press Enter. quit to exit.\n");

    // Create LLM provider and embedder
    let llm_config = LlmConfig {
        backend,
        api_key: secrecy::SecretString::from(api_key),
        model,
        embedding_model,
    };
    let llm = create_provider(&llm_config)?;

    // Embeddings always go through OpenAI, so an Anthropic setup needs a
    // second key.
    let embed_config = match backend {
        LlmBackend::OpenAi => llm_config.clone(),
        LlmBackend::Anthropic => {
            let openai_key = std::env::var("OPENAI_API_KEY").unwrap_or_else(|_| {
                eprintln!("Error: OPENAI_API_KEY not set (required for embeddings)");
                std::process::exit(1);
            });
            LlmConfig {
                backend: LlmBackend::OpenAi,
                api_key: secrecy::SecretString::from(openai_key),
                ..llm_config.clone()
            }
        }
    };
    let embedder = create_embedder(&embed_config)?;

    // ── Records ──────────────────────────────────────────────────────────
    let task_text = std::fs::read_to_string(&tasks_path)
        .with_context(|| format!("Failed to read tasks from {}", tasks_path))?;
    let tasks = if tasks_path.ends_with(".json") {
        parse_tasks_json(&task_text)?
    } else {
        parse_task_blocks(&task_text)
    };

    let employee_text = std::fs::read_to_string(&employees_path)
        .with_context(|| format!("Failed to read employees from {}", employees_path))?;
    let employees = parse_employees(&employee_text)?;

    eprintln!(
        "   Loaded {} tasks, {} employees",
        tasks.len(),
        employees.len()
    );
    let roster = Arc::new(Roster::new(employees, tasks));

    // ── Indexes ──────────────────────────────────────────────────────────
    let matcher = Arc::new(SkillMatcher::build(Arc::clone(&embedder), &roster).await?);
    let retriever = Arc::new(ContextRetriever::build(Arc::clone(&embedder), &roster).await?);

    // ── Tools ────────────────────────────────────────────────────────────
    let config = AssistConfig::default();
    let scorer = Arc::new(AllocationScorer::new(
        llm.clone(),
        config.weekly_capacity_hours,
    ));
    let classifier = Arc::new(PriorityClassifier::new(llm.clone()));

    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(SkillMatchTool::new(
        Arc::clone(&matcher),
        config.skill_match_k,
    )));
    tools.register(Arc::new(WorkloadTool::new(Arc::clone(&roster))));
    tools.register(Arc::new(AllocateTaskTool::new(
        Arc::clone(&scorer),
        Arc::clone(&roster),
    )));
    tools.register(Arc::new(PrioritizeTaskTool::new(
        Arc::clone(&classifier),
        Arc::clone(&roster),
    )));
    eprintln!("   Tools: {} registered\n", tools.count());

    // ── Dispatcher ───────────────────────────────────────────────────────
    let dispatcher = Arc::new(ReasoningDispatcher::new(
        llm,
        Arc::new(tools),
        roster,
        Some(retriever),
        config,
    ));

    Shell::new(dispatcher).run().await?;

    Ok(())
}
