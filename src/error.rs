//! Unified application error types
//!
//! Provides a single error type for the entire application. Handlers return
//! it directly; its response is an HTML fragment that never exposes internal
//! details.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::storage::StorageError;
use crate::views::{EmptySearchView, SearchErrorView};

/// Message shown for every failure that is not the user's fault
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while searching. Please try again.";

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid user input, shown to the user as is
    #[error("validation error: {0}")]
    Validation(String),

    /// Database or connection pool failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Template rendering failure
    #[error("render error: {0}")]
    Render(#[from] askama::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// File or socket operation error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Render(_) => "RENDER_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status the error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let rendered = match &self {
            Self::Validation(message) => {
                tracing::warn!(code = self.code(), "{}", message);
                askama::Template::render(&EmptySearchView::new(message.as_str()))
            }
            _ => {
                tracing::error!(code = self.code(), error = %self, "request failed");
                askama::Template::render(&SearchErrorView::new(GENERIC_FAILURE_MESSAGE))
            }
        };

        match rendered {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error view: {}", e);
                (status, GENERIC_FAILURE_MESSAGE).into_response()
            }
        }
    }
}
