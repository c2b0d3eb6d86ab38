pub mod retry;
pub mod tool_repository;

pub use retry::RetryPolicy;
pub use tool_repository::ToolRepository;
