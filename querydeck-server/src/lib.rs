//! querydeck-server: named SQL queries served over HTTP
//!
//! A request is matched in the [`http::RouteTable`], its parameters are
//! checked against the route's [`query::QueryDefinition`], the statement runs
//! on a leased connection from the [`db::ConnectionPool`], and the rows are
//! rendered as JSON or as an HTML document by a [`render::Renderer`].

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod query;
pub mod render;

pub use config::DatabaseConfig;
pub use db::{ConnectionPool, PoolConfig, PoolStatus};
pub use error::{ConfigError, QueryError};
pub use http::{build_router, default_routes, run_server, AppState, ServerConfig};
pub use query::{catalog, QueryDefinition, QueryExecutor, QueryParams, QueryResult};
pub use render::Renderer;
