//! Request failures rendered in the route's response shape.
//!
//! Database failures are logged with their full cause and answered with the
//! route's generic failure message; every other variant's message is safe
//! to show the caller as is.

use axum::response::{IntoResponse, Response};

use crate::error::QueryError;
use crate::render::Renderer;

/// Generic message for requests that never reached a route.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to process the request.";

/// A [`QueryError`] plus what is needed to answer it.
#[derive(Debug)]
pub struct ApiError {
    pub error: QueryError,
    pub renderer: Renderer,
    pub failure_message: &'static str,
}

impl ApiError {
    pub fn new(error: QueryError, renderer: Renderer, failure_message: &'static str) -> Self {
        Self {
            error,
            renderer,
            failure_message,
        }
    }

    /// Client-visible message.
    pub fn message(&self) -> String {
        match &self.error {
            QueryError::QueryExecutionFailed { .. } => self.failure_message.to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors outside any route (unknown paths) answer in JSON.
impl From<QueryError> for ApiError {
    fn from(error: QueryError) -> Self {
        Self::new(error, Renderer::Json, DEFAULT_FAILURE_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        match &self.error {
            QueryError::QueryExecutionFailed { cause } => {
                tracing::error!(error = %cause, "{}", self.failure_message);
            }
            caller if caller.is_client_error() => {
                tracing::debug!(error = %caller, "rejected request");
            }
            other => tracing::warn!(error = %other, "request refused"),
        }

        self.renderer.render_error(status, &self.message())
    }
}
