//! `querydeck serve`: run the HTTP server until Ctrl+C or SIGTERM.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use querydeck_server::{default_routes, run_server, AppState, ServerConfig};

use super::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Directory served under /static
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,

    /// Directory served under /images
    #[arg(long, value_name = "DIR")]
    pub images_dir: Option<PathBuf>,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = args.database.to_config();
    tracing::debug!(config = ?db_config, "database configuration");

    let executor = db_config
        .build_executor()
        .context("Invalid database configuration")?;
    let routes = default_routes().context("Failed to build the route table")?;

    executor.pool().warm().await;

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        static_dir: args.static_dir,
        images_dir: args.images_dir,
    };

    run_server(AppState::new(executor, routes), config)
        .await
        .context("Server error")?;

    Ok(())
}
