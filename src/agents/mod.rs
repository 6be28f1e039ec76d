//! Model-assisted scorers — allocation and priority.

pub mod allocator;
pub mod prioritizer;

pub use allocator::{AllocationResult, AllocationScorer};
pub use prioritizer::{PriorityClassifier, PriorityLevel, PriorityResult};
