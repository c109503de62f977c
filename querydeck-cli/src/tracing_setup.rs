//! Console tracing for the querydeck binary
//!
//! Usage:
//!   querydeck --debug serve              # Debug logging to stderr
//!   RUST_LOG=querydeck_server=trace ...  # Fine-grained log control
//!
//! Logs go to stderr so `querydeck query` output stays pipeable.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConfig {
    /// Default to `debug` when RUST_LOG is not set
    pub debug: bool,
}

pub fn init(config: TracingConfig) -> Result<()> {
    let fallback = if config.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
