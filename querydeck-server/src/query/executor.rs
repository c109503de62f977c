//! Runs query definitions against the pool.

use std::io;
use std::time::{Duration, Instant};

use super::{QueryDefinition, QueryParams, QueryResult};
use crate::db::{is_connection_fault, ConnectionPool};
use crate::error::QueryError;

/// Upper bound on a single statement.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes definitions one statement per lease. Never retries.
#[derive(Clone)]
pub struct QueryExecutor {
    pool: ConnectionPool,
    timeout: Duration,
}

impl QueryExecutor {
    pub fn new(pool: ConnectionPool) -> Self {
        Self {
            pool,
            timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Run `definition` with `params`.
    ///
    /// Parameters are checked before the pool is touched. The lease is
    /// returned on every path; a session that failed at the transport level
    /// or timed out is discarded instead of parked.
    pub async fn execute(
        &self,
        definition: &QueryDefinition,
        params: &QueryParams,
    ) -> Result<QueryResult, QueryError> {
        definition.check_params(params)?;

        let mut conn = self.pool.acquire().await?;
        let started = Instant::now();

        let outcome = tokio::time::timeout(
            self.timeout,
            conn.fetch_rows(definition.sql, params.values()),
        )
        .await;

        match outcome {
            Ok(Ok(rows)) => {
                conn.release();
                let result = QueryResult::new(rows);
                tracing::debug!(
                    query = %definition.id(),
                    rows = result.row_count,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "query executed"
                );
                Ok(result)
            }
            Ok(Err(cause)) => {
                if is_connection_fault(&cause) {
                    conn.discard();
                } else {
                    conn.release();
                }
                Err(QueryError::execution(cause))
            }
            Err(_elapsed) => {
                conn.discard();
                Err(QueryError::execution(sqlx::Error::Io(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("query timed out after {} seconds", self.timeout.as_secs()),
                ))))
            }
        }
    }
}
