//! Command implementations for the querydeck CLI

pub mod query;
pub mod routes;
pub mod serve;

use std::time::Duration;

use clap::Args;
use querydeck_server::{DatabaseConfig, PoolConfig};

pub use query::run_query;
pub use routes::run_routes;
pub use serve::run_serve;

/// Database connection flags shared by every command that talks to the
/// database.
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "root")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub db_password: String,

    /// Database (schema) name
    #[arg(long, env = "DB_NAME", default_value = "vital_watchers")]
    pub db_name: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 3306)]
    pub db_port: u16,

    /// Connection URL (mysql://… or sqlite:…); overrides the discrete fields
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum open connections
    #[arg(long, env = "DB_CONNECTION_LIMIT", default_value_t = 10)]
    pub connection_limit: usize,

    /// Maximum requests waiting for a connection (0 = unbounded)
    #[arg(long, env = "DB_QUEUE_LIMIT", default_value_t = 0)]
    pub queue_limit: usize,

    /// Per-query timeout in seconds
    #[arg(long, env = "DB_QUERY_TIMEOUT_SECS", default_value_t = 30)]
    pub query_timeout_secs: u64,
}

impl DatabaseArgs {
    pub fn to_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            host: self.db_host.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            database: self.db_name.clone(),
            port: self.db_port,
            url: self.database_url.clone(),
            pool: PoolConfig {
                connection_limit: self.connection_limit,
                queue_limit: self.queue_limit,
            },
            query_timeout: Duration::from_secs(self.query_timeout_secs),
        }
    }
}
