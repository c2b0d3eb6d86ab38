use crate::server::router::ToolboardState;
use axum::{
    Router,
    routing::{get, post},
};

pub mod handlers;

pub fn router() -> Router<ToolboardState> {
    Router::new()
        .route("/", get(handlers::list_tools))
        .route("/add", post(handlers::add_tool))
}
