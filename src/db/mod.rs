//! Database module: SQLite storage for submitted tools.
//!
//! Layout:
//! - `gateway.rs`: connection pool, per-connection settings, schema bootstrap
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `traits.rs`: the `ToolStore` seam used by the repository
//! - `sqlite.rs`: `ToolStore` backed by the gateway

pub mod gateway;
pub mod models;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use gateway::StorageGateway;
pub use models::{NewTool, Tool};
pub use schema::SQLITE_INIT;
pub use sqlite::SqliteToolStore;
pub use traits::ToolStore;
