//! PM Assist — LLM-backed project management assistant.

pub mod agents;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod llm;
pub mod matcher;
pub mod records;
pub mod shell;
pub mod tools;
pub mod workload;
