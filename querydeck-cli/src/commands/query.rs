//! `querydeck query`: run one catalog definition and print its rows as JSON.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use querydeck_server::catalog;
use querydeck_server::http::extract_params;

use super::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Definition name, e.g. `company.hours_worked_analysis`
    pub name: Option<String>,

    /// Definition version (default: latest)
    #[arg(long)]
    pub version: Option<u32>,

    /// Bind parameter as NAME=VALUE (repeatable)
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// List the catalog instead of running a query
    #[arg(long)]
    pub list: bool,

    /// Print compact JSON on one line
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

fn list_catalog() {
    for definition in catalog::all() {
        let params: Vec<_> = definition
            .parameters
            .iter()
            .map(|spec| format!("{}:{}", spec.name, spec.ty))
            .collect();
        println!("{:<48} {}", definition.id(), params.join(", "));
    }
}

pub async fn run_query(args: QueryArgs) -> Result<()> {
    if args.list {
        list_catalog();
        return Ok(());
    }

    let Some(name) = args.name.as_deref() else {
        bail!("a query name is required (see `querydeck query --list`)");
    };
    let definition = catalog::lookup(name, args.version).ok_or_else(|| match args.version {
        Some(version) => anyhow!("no query named '{name}' at version {version}"),
        None => anyhow!("no query named '{name}'"),
    })?;

    let raw: HashMap<String, String> = args.params.into_iter().collect();
    let params = extract_params(definition, &raw)?;

    let executor = args
        .database
        .to_config()
        .build_executor()
        .context("Invalid database configuration")?;

    let outcome = executor.execute(definition, &params).await;
    executor.pool().close().await;
    let result = outcome.with_context(|| format!("Query {} failed", definition.id()))?;

    tracing::info!(query = %definition.id(), rows = result.row_count, "query complete");
    let rendered = if args.compact {
        serde_json::to_string(&result.rows)?
    } else {
        serde_json::to_string_pretty(&result.rows)?
    };
    println!("{rendered}");
    Ok(())
}
