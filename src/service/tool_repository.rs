use crate::db::{NewTool, Tool, ToolStore};
use crate::error::{FetchFailure, IsRetryable, PersistenceFailure, StoreError};
use crate::service::retry::RetryPolicy;
use backon::Retryable;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Store access as seen by the request handlers: inserts retry on lock
/// contention, and no store error escapes past this type.
#[derive(Clone)]
pub struct ToolRepository {
    store: Arc<dyn ToolStore>,
    policy: RetryPolicy,
}

impl ToolRepository {
    pub fn new(store: Arc<dyn ToolStore>, policy: RetryPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Inserts `tool`, retrying while the store reports busy/locked.
    ///
    /// Every attempt is its own transaction, so a failure leaves no row behind.
    pub async fn insert_with_retry(&self, tool: &NewTool) -> Result<i64, PersistenceFailure> {
        let store = self.store.as_ref();
        let mut attempts = 0usize;

        let result = (|| {
            attempts += 1;
            let attempt = attempts;
            async move {
                store.insert(tool).await.inspect_err(|err| {
                    debug!(attempt, error = %err, "Tool insert attempt failed");
                })
            }
        })
        .retry(self.policy)
        .when(|err: &StoreError| err.is_retryable())
        .notify(|err: &StoreError, delay: Duration| {
            warn!(
                error = %err,
                delay_ms = delay.as_millis() as u64,
                "Store busy, retrying tool insert"
            );
        })
        .await;

        match result {
            Ok(id) => {
                info!(id, attempts, "Tool saved");
                Ok(id)
            }
            Err(err) => {
                error!(
                    attempts,
                    max_attempts = self.policy.max_attempts,
                    error = %err,
                    "Tool insert failed"
                );
                Err(PersistenceFailure)
            }
        }
    }

    /// All tools, newest first.
    pub async fn fetch_all(&self) -> Result<Vec<Tool>, FetchFailure> {
        self.store.fetch_all().await.map_err(|err| {
            error!(error = %err, "Fetching tools failed");
            FetchFailure
        })
    }
}
