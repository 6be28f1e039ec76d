//! Session context shared with tool execution.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Context for one reasoning session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Unique session ID.
    pub session_id: Uuid,
    /// The user query that opened the session.
    pub query: String,
    /// When the session started.
    pub started_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            query: query.into(),
            started_at: Utc::now(),
        }
    }
}
