//! SQL DDL for initializing the database schema.

/// SQLite schema includes:
/// - `student_tools` table (append-only; AUTOINCREMENT keeps ids from being reused)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS student_tools (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tool_name TEXT NOT NULL,
    description TEXT NOT NULL,
    link TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP -- UTC, "YYYY-MM-DD HH:MM:SS"
);
"#;
