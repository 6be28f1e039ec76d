//! Task and employee record handling.
//!
//! Records are loaded once at startup and are read-only for the lifetime of
//! a reasoning session. Tasks arrive either as `Key: value` line blocks (the
//! export format) or as a JSON array; employees are always a JSON array.

pub mod employees;
pub mod model;
pub mod tasks;

pub use employees::parse_employees;
pub use model::{Employee, Roster, Task};
pub use tasks::{parse_task_blocks, parse_tasks_json};
