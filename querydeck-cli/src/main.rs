//! querydeck CLI - named SQL queries served as JSON and HTML endpoints
//!
//! - `serve`: run the HTTP server over the built-in route table
//! - `routes`: print the route table
//! - `query`: run one catalog definition and print its rows

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "querydeck",
    author,
    version,
    about = "Serve a catalog of named SQL queries over HTTP",
    long_about = "Run parameterized SQL queries through a bounded connection pool and \
                  render the rows as JSON or as HTML dashboards."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Print every registered route
    Routes(commands::routes::RoutesArgs),
    /// Run one query definition and print the rows as JSON
    Query(commands::query::QueryArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Routes(args) => commands::run_routes(args)?,
        Commands::Query(args) => commands::run_query(args).await?,
    }
    Ok(())
}
