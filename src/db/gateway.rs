use crate::config::StoreConfig;
use crate::db::schema::SQLITE_INIT;
use crate::error::StoreError;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{ConnectOptions, Connection, Sqlite, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

/// Owns the SQLite pool and the per-connection settings applied to it.
///
/// The pool is lazy: nothing touches the database file until the first
/// `acquire()` (or `ensure_schema()`), so a missing or locked file never
/// prevents the process from starting.
#[derive(Clone)]
pub struct StorageGateway {
    pool: SqlitePool,
    connect_opts: SqliteConnectOptions,
}

impl StorageGateway {
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        let connect_opts = SqliteConnectOptions::from_str(cfg.database_url.as_str())?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(cfg.busy_timeout());

        let pool = SqlitePoolOptions::new()
            .acquire_timeout(cfg.acquire_timeout())
            .connect_lazy_with(connect_opts.clone());

        Ok(Self { pool, connect_opts })
    }

    /// Hands out a pooled connection; it returns to the pool on drop.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        Ok(self.pool.acquire().await?)
    }

    /// Creates the schema if absent. WAL journaling and `synchronous = NORMAL`
    /// are applied here, on a dedicated connection, and nowhere else.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut conn = self
            .connect_opts
            .clone()
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .connect()
            .await?;

        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            debug!(statement = s, "Applying schema statement");
            sqlx::query(s).execute(&mut conn).await?;
        }

        conn.close().await?;
        info!("Database schema ready");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
