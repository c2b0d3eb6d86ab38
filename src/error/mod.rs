mod store;
mod toolboard;
mod validation;

pub use store::{FetchFailure, PersistenceFailure, StoreError};
pub use toolboard::ToolboardError;
pub use validation::ValidationError;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
