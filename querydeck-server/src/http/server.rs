//! Axum server setup
//!
//! Every query route goes through one fallback handler that hands the
//! request to the [`RouteTable`]. Alongside it:
//! - `GET /health` with pool status
//! - optional static and image directories
//! - request tracing
//! - graceful shutdown on SIGTERM/Ctrl+C, then the pool is closed

use std::any::Any;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::error::{ApiError, DEFAULT_FAILURE_MESSAGE};
use super::table::RouteTable;
use crate::db::PoolStatus;
use crate::query::QueryExecutor;
use crate::render::Renderer;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,

    /// Served under `/static`
    pub static_dir: Option<PathBuf>,

    /// Served under `/images`
    pub images_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            static_dir: None,
            images_dir: None,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub executor: QueryExecutor,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    pub fn new(executor: QueryExecutor, routes: RouteTable) -> Self {
        Self {
            executor,
            routes: Arc::new(routes),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub pool: PoolStatus,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let pool = state.executor.pool();
    Json(HealthResponse {
        status: if pool.is_closed() { "closing" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        pool: pool.status(),
    })
}

/// Every other request: look it up in the route table.
async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    // A malformed query string is treated as empty; required parameters
    // then report as missing.
    let params = Query::<HashMap<String, String>>::try_from_uri(&uri)
        .map(|Query(params)| params)
        .unwrap_or_default();

    state
        .routes
        .dispatch(&state.executor, &method, uri.path(), &params)
        .await
}

/// A panicking request answers 500 in JSON; the server keeps running.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "request handler panicked");
    Renderer::Json.render_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        DEFAULT_FAILURE_MESSAGE,
    )
}

/// Build the router. Exposed separately from [`run_server`] for tests.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let mut app = Router::new().route("/health", get(health));

    if let Some(dir) = &config.static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }
    if let Some(dir) = &config.images_dir {
        app = app.nest_service("/images", ServeDir::new(dir));
    }

    app.fallback(dispatch)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives, then close the pool.
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let pool = state.executor.pool().clone();
    let routes = state.routes.len();
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        routes,
        backend = pool.backend(),
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
