//! Method + path → (query, renderer) bindings.
//!
//! Built once at startup and shared read-only. Dispatch runs the whole
//! pipeline for one request: match, extract parameters, execute, render.

use std::collections::HashMap;

use axum::http::Method;
use axum::response::Response;
use thiserror::Error;

use super::error::ApiError;
use crate::error::QueryError;
use crate::query::{ParamValue, QueryDefinition, QueryExecutor, QueryParams};
use crate::render::Renderer;

/// One registered endpoint.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub method: Method,
    pub path: &'static str,
    pub query: &'static QueryDefinition,
    pub renderer: Renderer,
    /// Shown to the client when the query fails.
    pub failure_message: &'static str,
}

#[derive(Debug, Error)]
#[error("route {method} {path} is already registered")]
pub struct DuplicateRoute {
    pub method: Method,
    pub path: String,
}

#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    index: HashMap<(Method, String), usize>,
}

fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        method: Method,
        path: &'static str,
        query: &'static QueryDefinition,
        renderer: Renderer,
        failure_message: &'static str,
    ) -> Result<&mut Self, DuplicateRoute> {
        let key = (method.clone(), normalize(path).to_string());
        if self.index.contains_key(&key) {
            return Err(DuplicateRoute {
                method,
                path: path.to_string(),
            });
        }

        self.index.insert(key, self.entries.len());
        self.entries.push(RouteEntry {
            method,
            path,
            query,
            renderer,
            failure_message,
        });
        Ok(self)
    }

    /// Register a `GET` route.
    pub fn get(
        &mut self,
        path: &'static str,
        query: &'static QueryDefinition,
        renderer: Renderer,
        failure_message: &'static str,
    ) -> Result<&mut Self, DuplicateRoute> {
        self.register(Method::GET, path, query, renderer, failure_message)
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact match on method and path; one trailing slash is ignored.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&RouteEntry> {
        let key = (method.clone(), normalize(path).to_string());
        self.index.get(&key).map(|&i| &self.entries[i])
    }

    /// Run the full pipeline for one request.
    pub async fn dispatch(
        &self,
        executor: &QueryExecutor,
        method: &Method,
        path: &str,
        raw_params: &HashMap<String, String>,
    ) -> Result<Response, ApiError> {
        let entry = self
            .lookup(method, path)
            .ok_or_else(|| QueryError::RouteNotFound {
                method: method.to_string(),
                path: path.to_string(),
            })?;

        let fail = |error| ApiError::new(error, entry.renderer.clone(), entry.failure_message);

        let params = extract_params(entry.query, raw_params).map_err(fail)?;
        let result = executor.execute(entry.query, &params).await.map_err(fail)?;

        tracing::debug!(
            route = entry.path,
            query = %entry.query.id(),
            rows = result.row_count,
            "rendering"
        );
        Ok(entry.renderer.render(&result))
    }
}

/// Pull the definition's parameters out of the query string.
///
/// Absent or empty values are missing; values that do not parse as the
/// declared type are a mismatch.
pub fn extract_params(
    definition: &QueryDefinition,
    raw: &HashMap<String, String>,
) -> Result<QueryParams, QueryError> {
    let mut params = QueryParams::new();
    for spec in definition.parameters {
        let value = match raw.get(spec.name) {
            Some(value) if !value.is_empty() => value,
            _ => return Err(QueryError::MissingParameter { name: spec.name }),
        };
        let parsed =
            ParamValue::parse(spec.ty, value).ok_or_else(|| QueryError::ParameterMismatch {
                query: definition.name,
                reason: format!("parameter '{}' must be {}", spec.name, spec.ty),
            })?;
        params.push(spec.name, parsed);
    }
    Ok(params)
}
