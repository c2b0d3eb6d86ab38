use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Tool {
    pub id: i64,
    pub tool_name: String,
    pub description: String,
    pub link: String,
    /// Assigned by SQLite (`CURRENT_TIMESTAMP`, UTC).
    pub created_at: NaiveDateTime,
}

/// A validated submission, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTool {
    pub tool_name: String,
    pub description: String,
    pub link: String,
}
