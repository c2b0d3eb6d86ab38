pub mod config;
pub mod db;
pub mod error;
pub mod sanitize;
pub mod server;
pub mod service;

pub use error::ToolboardError;
