//! `querydeck routes`: print the route table.

use anyhow::{Context, Result};
use clap::Parser;
use querydeck_server::default_routes;

#[derive(Parser, Debug)]
pub struct RoutesArgs {
    /// Print as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run_routes(args: RoutesArgs) -> Result<()> {
    let table = default_routes().context("Failed to build the route table")?;

    if args.json {
        let entries: Vec<_> = table
            .entries()
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "method": entry.method.as_str(),
                    "path": entry.path,
                    "query": entry.query.id(),
                    "renderer": entry.renderer.kind(),
                    "parameters": entry.query.parameters,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let width = table
        .entries()
        .iter()
        .map(|entry| entry.path.len())
        .max()
        .unwrap_or_default();
    for entry in table.entries() {
        println!(
            "{:<6} {:<width$}  {:<4}  {}",
            entry.method.as_str(),
            entry.path,
            entry.renderer.kind(),
            entry.query.id(),
        );
    }
    Ok(())
}
