//! Built-in tools wrapping the matcher, workload calculator, and scorers.

pub mod allocation;
pub mod priority;
pub mod skills;
pub mod workload;

pub use allocation::AllocateTaskTool;
pub use priority::PrioritizeTaskTool;
pub use skills::SkillMatchTool;
pub use workload::WorkloadTool;
