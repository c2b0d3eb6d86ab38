use crate::db::gateway::StorageGateway;
use crate::db::models::{NewTool, Tool};
use crate::db::traits::ToolStore;
use crate::error::StoreError;
use async_trait::async_trait;
use sqlx::Connection;

#[derive(Clone)]
pub struct SqliteToolStore {
    gateway: StorageGateway,
}

impl SqliteToolStore {
    pub fn new(gateway: StorageGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl ToolStore for SqliteToolStore {
    async fn insert(&self, tool: &NewTool) -> Result<i64, StoreError> {
        let mut conn = self.gateway.acquire().await?;
        // Rolled back on drop if anything below fails.
        let mut tx = conn.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO student_tools (tool_name, description, link)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&tool.tool_name)
        .bind(&tool.description)
        .bind(&tool.link)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    async fn fetch_all(&self) -> Result<Vec<Tool>, StoreError> {
        let mut conn = self.gateway.acquire().await?;
        let rows = sqlx::query_as::<_, Tool>(
            r#"
            SELECT id, tool_name, description, link, created_at
            FROM student_tools
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }
}
