use serde::{Deserialize, Serialize};
use std::time::Duration;

/// SQLite store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Database URL for SQLite.
    /// TOML: `store.database_url`. Default: `sqlite://database.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// How long a single statement waits on a locked database before reporting busy.
    /// TOML: `store.busy_timeout_ms`. Default: `10000`.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Total insert attempts when the database reports busy/locked.
    /// TOML: `store.insert_max_attempts`. Default: `3`.
    #[serde(default = "default_insert_max_attempts")]
    pub insert_max_attempts: usize,

    /// Linear backoff step between insert attempts (`attempt * step`).
    /// TOML: `store.retry_step_ms`. Default: `200`.
    #[serde(default = "default_retry_step_ms")]
    pub retry_step_ms: u64,

    /// Upper bound for waiting on a pooled connection.
    /// TOML: `store.acquire_timeout_secs`. Default: `15`.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            busy_timeout_ms: default_busy_timeout_ms(),
            insert_max_attempts: default_insert_max_attempts(),
            retry_step_ms: default_retry_step_ms(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Convenience constructor for a given database URL with default tuning.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    pub fn retry_step(&self) -> Duration {
        Duration::from_millis(self.retry_step_ms)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

fn default_database_url() -> String {
    "sqlite://database.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    10_000
}

fn default_insert_max_attempts() -> usize {
    3
}

fn default_retry_step_ms() -> u64 {
    200
}

fn default_acquire_timeout_secs() -> u64 {
    15
}
