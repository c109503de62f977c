//! Error taxonomy for the query pipeline
//!
//! Every stage of a request (dispatch, validation, execution) fails with a
//! [`QueryError`]. The HTTP layer maps each variant to a status code and a
//! body in the route's renderer variant; nothing escapes as a panic.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    /// No idle connection and the wait queue is full
    #[error("connection pool exhausted ({waiting} requests already waiting)")]
    PoolExhausted { waiting: usize },

    /// Pool has been shut down
    #[error("connection pool is closed")]
    PoolClosed,

    /// Supplied parameters don't line up with the definition
    #[error("parameter mismatch for query '{query}': {reason}")]
    ParameterMismatch { query: &'static str, reason: String },

    /// Required request parameter absent or empty
    #[error("{name} is required")]
    MissingParameter { name: &'static str },

    /// Database-level failure (syntax, constraint, timeout, connection loss)
    #[error("query execution failed: {cause}")]
    QueryExecutionFailed {
        #[source]
        cause: sqlx::Error,
    },

    #[error("no route for {method} {path}")]
    RouteNotFound { method: String, path: String },
}

impl QueryError {
    pub fn execution(cause: sqlx::Error) -> Self {
        Self::QueryExecutionFailed { cause }
    }

    /// HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::PoolExhausted { .. } | Self::PoolClosed => StatusCode::SERVICE_UNAVAILABLE,
            Self::ParameterMismatch { .. } | Self::MissingParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::QueryExecutionFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Caller errors are never worth retrying and are not logged as failures.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

/// Invalid database configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unsupported database url scheme '{0}' (expected mysql:// or sqlite:)")]
    UnsupportedScheme(String),

    #[error("invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    #[error("connection_limit must be at least 1")]
    ZeroConnectionLimit,

    #[error("connection_limit {limit} exceeds the maximum of {max}")]
    ConnectionLimitTooLarge { limit: usize, max: usize },
}
