//! Database layer - connectors, sessions and the connection pool
//!
//! # Design Principles
//!
//! - One bounded pool per process, leased per request
//! - Parameters always travel through the driver's bind mechanism
//! - Rows decode into insertion-ordered JSON maps so column order survives

pub mod mysql;
pub mod pool;
pub mod sqlite;

mod session;

#[cfg(test)]
pub(crate) mod mock;

pub use mysql::MySqlConnector;
pub use pool::{ConnectionPool, PoolConfig, PoolStatus, PooledConnection, MAX_CONNECTION_LIMIT};
pub use session::{is_connection_fault, Connector, Row, Session};
pub use sqlite::SqliteConnector;
