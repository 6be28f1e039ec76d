//! Tool abstraction for the dispatcher's sub-agents.

pub mod builtin;
pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::*;
