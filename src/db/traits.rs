use crate::db::models::{NewTool, Tool};
use crate::error::StoreError;
use async_trait::async_trait;

/// Single-attempt persistence operations for tools.
///
/// Retry and failure absorption live above this trait, in
/// `service::ToolRepository`.
#[async_trait]
pub trait ToolStore: Send + Sync {
    /// Inserts one row inside its own transaction and returns the new id.
    async fn insert(&self, tool: &NewTool) -> Result<i64, StoreError>;

    /// All tools, newest (highest id) first.
    async fn fetch_all(&self) -> Result<Vec<Tool>, StoreError>;
}
