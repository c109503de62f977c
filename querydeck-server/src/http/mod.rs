//! HTTP layer
//!
//! One route table, one fallback handler, errors rendered in the route's
//! own shape.

pub mod error;
pub mod routes;
pub mod server;
pub mod table;

pub use error::ApiError;
pub use routes::default_routes;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use table::{extract_params, DuplicateRoute, RouteEntry, RouteTable};
