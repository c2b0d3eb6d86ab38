use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;
use tracing::error;

use super::StoreError;

#[derive(Debug, ThisError)]
pub enum ToolboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Cookie key error: {0}")]
    CookieKey(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl From<figment::Error> for ToolboardError {
    fn from(err: figment::Error) -> Self {
        ToolboardError::Config(Box::new(err))
    }
}

impl From<handlebars::TemplateError> for ToolboardError {
    fn from(err: handlebars::TemplateError) -> Self {
        ToolboardError::Template(Box::new(err))
    }
}

impl IntoResponse for ToolboardError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal server error occurred.",
        )
            .into_response()
    }
}
