use sqlx::error::DatabaseError;
use thiserror::Error as ThisError;

use super::IsRetryable;

// SQLite primary result codes (extended codes carry them in the low byte).
const SQLITE_PERM: i32 = 3;
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_CANTOPEN: i32 = 14;
const SQLITE_NOTADB: i32 = 26;

/// Store-layer failure, classified once at the sqlx boundary.
#[derive(Debug, ThisError)]
pub enum StoreError {
    /// The database could not be opened or no connection could be handed out.
    #[error("Store connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Another writer holds the lock and the busy timeout elapsed.
    #[error("Store busy: {0}")]
    Busy(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match sqlite_primary_code(&**db_err) {
                Some(SQLITE_BUSY | SQLITE_LOCKED) => StoreError::Busy(err),
                Some(SQLITE_CANTOPEN | SQLITE_NOTADB | SQLITE_PERM) => StoreError::Connection(err),
                _ => StoreError::Database(err),
            },
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Connection(err),
            _ => StoreError::Database(err),
        }
    }
}

fn sqlite_primary_code(err: &dyn DatabaseError) -> Option<i32> {
    err.code()?.parse::<i32>().ok().map(|code| code & 0xff)
}

impl IsRetryable for StoreError {
    fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Busy(_))
    }
}

/// Insert gave up; the cause has already been logged.
#[derive(Debug, ThisError)]
#[error("could not persist tool")]
pub struct PersistenceFailure;

/// Listing failed; the cause has already been logged.
#[derive(Debug, ThisError)]
#[error("could not fetch tools")]
pub struct FetchFailure;
