//! Configuration types.

use std::time::Duration;

/// Assistant configuration.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    /// Assistant name for identification.
    pub name: String,
    /// Weekly capacity per employee in hours. Availability is this minus
    /// current workload.
    pub weekly_capacity_hours: f64,
    /// Maximum dispatcher steps per reasoning session.
    pub max_iterations: u32,
    /// Maximum attempts for a rate-limited reasoning session.
    pub max_retries: u32,
    /// Base delay for exponential backoff (doubles each retry).
    pub retry_base_delay: Duration,
    /// How many index neighbors the skill matcher returns by default.
    pub skill_match_k: usize,
    /// How many context snippets are retrieved to ground each session.
    pub context_k: usize,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            name: "pm-assist".to_string(),
            weekly_capacity_hours: 40.0,
            max_iterations: 3,
            max_retries: 5,
            retry_base_delay: Duration::from_secs(5),
            skill_match_k: 3,
            context_k: 5,
        }
    }
}
