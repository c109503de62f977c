//! Bounded connection pool
//!
//! Capacity is a semaphore with `connection_limit` permits and every lease
//! holds one permit for its whole life. Sessions are opened lazily, up to the
//! limit, and parked on a LIFO idle stack between leases. Callers that find no
//! free permit join a wait queue bounded by `queue_limit` (0 = unbounded).
//!
//! Lifecycle is explicit: [`ConnectionPool::new`] → [`ConnectionPool::warm`]
//! → serve → [`ConnectionPool::close`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};

use super::session::{Connector, Row, Session};
use crate::error::QueryError;
use crate::query::ParamValue;

/// Default maximum connections for the pool.
pub const DEFAULT_CONNECTION_LIMIT: usize = 10;

/// Largest accepted `connection_limit`.
pub const MAX_CONNECTION_LIMIT: usize = 1024;

/// Pool sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum number of open sessions
    pub connection_limit: usize,
    /// Maximum number of queued acquirers (0 = unbounded)
    pub queue_limit: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            connection_limit: DEFAULT_CONNECTION_LIMIT,
            queue_limit: 0,
        }
    }
}

/// Point-in-time view of the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    pub connection_limit: usize,
    pub queue_limit: usize,
    pub open: usize,
    pub idle: usize,
    pub in_use: usize,
    pub waiting: usize,
}

/// Shared handle to the pool. Cheap to clone.
#[derive(Clone)]
pub struct ConnectionPool {
    inner: Arc<PoolInner>,
}

struct PoolInner {
    connector: Box<dyn Connector>,
    config: PoolConfig,
    permits: Arc<Semaphore>,
    idle: Mutex<Vec<Box<dyn Session>>>,
    open: AtomicUsize,
    waiting: AtomicUsize,
}

impl ConnectionPool {
    /// Create an empty pool. No session is opened until [`warm`](Self::warm)
    /// or the first [`acquire`](Self::acquire).
    pub fn new(connector: Box<dyn Connector>, config: PoolConfig) -> Self {
        let limit = config.connection_limit.clamp(1, MAX_CONNECTION_LIMIT);
        Self {
            inner: Arc::new(PoolInner {
                connector,
                config: PoolConfig {
                    connection_limit: limit,
                    ..config
                },
                permits: Arc::new(Semaphore::new(limit)),
                idle: Mutex::new(Vec::new()),
                open: AtomicUsize::new(0),
                waiting: AtomicUsize::new(0),
            }),
        }
    }

    pub fn config(&self) -> PoolConfig {
        self.inner.config
    }

    pub fn backend(&self) -> &'static str {
        self.inner.connector.backend()
    }

    /// Lease a session.
    ///
    /// # Errors
    ///
    /// - `PoolExhausted` if every permit is taken and the wait queue is full
    /// - `PoolClosed` after [`close`](Self::close)
    /// - `QueryExecutionFailed` if a new session could not be opened
    pub async fn acquire(&self) -> Result<PooledConnection, QueryError> {
        let permit = match Arc::clone(&self.inner.permits).try_acquire_owned() {
            Ok(permit) => permit,
            Err(TryAcquireError::Closed) => return Err(QueryError::PoolClosed),
            Err(TryAcquireError::NoPermits) => self.wait_for_permit().await?,
        };

        let session = match self.inner.pop_idle() {
            Some(session) => session,
            None => {
                // Permit drops with the error, freeing the slot.
                let session = self.inner.connector.connect().await.map_err(|cause| {
                    tracing::warn!(
                        backend = self.backend(),
                        error = %cause,
                        "failed to open database session"
                    );
                    QueryError::execution(cause)
                })?;
                let open = self.inner.open.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::debug!(backend = self.backend(), open, "opened database session");
                session
            }
        };

        Ok(PooledConnection {
            session: Some(session),
            in_flight: false,
            pool: Arc::clone(&self.inner),
            _permit: permit,
        })
    }

    /// Return a session to the idle set. Equivalent to dropping the lease.
    pub fn release(&self, connection: PooledConnection) {
        drop(connection);
    }

    async fn wait_for_permit(&self) -> Result<OwnedSemaphorePermit, QueryError> {
        let ahead = self.inner.waiting.fetch_add(1, Ordering::SeqCst);
        let _slot = WaitSlot(&self.inner.waiting);

        let limit = self.inner.config.queue_limit;
        if limit > 0 && ahead >= limit {
            tracing::warn!(
                waiting = ahead,
                queue_limit = limit,
                "connection pool exhausted"
            );
            return Err(QueryError::PoolExhausted { waiting: ahead });
        }

        Arc::clone(&self.inner.permits)
            .acquire_owned()
            .await
            .map_err(|_| QueryError::PoolClosed)
    }

    /// Open and ping one session to check the database is reachable.
    ///
    /// Failure is logged, never returned: the first real request will fail on
    /// its own if the database is really gone.
    pub async fn warm(&self) -> bool {
        let mut conn = match self.acquire().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(
                    backend = self.backend(),
                    error = %e,
                    "error connecting to the database"
                );
                return false;
            }
        };

        match conn.ping().await {
            Ok(()) => {
                tracing::info!(backend = self.backend(), "connected to the database");
                true
            }
            Err(e) => {
                tracing::error!(backend = self.backend(), error = %e, "database ping failed");
                conn.discard();
                false
            }
        }
    }

    /// Stop handing out leases and close every idle session.
    ///
    /// Leases still out are dropped (not parked) when they come back.
    pub async fn close(&self) {
        self.inner.permits.close();
        let idle = std::mem::take(&mut *self.inner.lock_idle());
        for session in idle {
            self.inner.open.fetch_sub(1, Ordering::SeqCst);
            if let Err(e) = session.close().await {
                tracing::debug!(error = %e, "error closing database session");
            }
        }
        tracing::info!(backend = self.backend(), "connection pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.inner.permits.is_closed()
    }

    pub fn status(&self) -> PoolStatus {
        let idle = self.inner.lock_idle().len();
        let open = self.inner.open.load(Ordering::SeqCst);
        PoolStatus {
            connection_limit: self.inner.config.connection_limit,
            queue_limit: self.inner.config.queue_limit,
            open,
            idle,
            in_use: open.saturating_sub(idle),
            waiting: self.inner.waiting.load(Ordering::SeqCst),
        }
    }
}

impl PoolInner {
    fn lock_idle(&self) -> MutexGuard<'_, Vec<Box<dyn Session>>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pop_idle(&self) -> Option<Box<dyn Session>> {
        self.lock_idle().pop()
    }

    fn restore(&self, session: Box<dyn Session>) {
        if self.permits.is_closed() {
            self.forget(session);
            return;
        }
        self.lock_idle().push(session);
    }

    fn forget(&self, session: Box<dyn Session>) {
        self.open.fetch_sub(1, Ordering::SeqCst);
        drop(session);
    }
}

/// Queue position held while waiting for a permit. Released on every exit,
/// including when the waiting request is cancelled.
struct WaitSlot<'a>(&'a AtomicUsize);

impl Drop for WaitSlot<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A leased session.
///
/// Dropping the lease parks the session on the idle stack; if the lease is
/// dropped while a statement is still running, the session is discarded.
pub struct PooledConnection {
    session: Option<Box<dyn Session>>,
    in_flight: bool,
    pool: Arc<PoolInner>,
    // Declared last: the session must be parked before the permit frees.
    _permit: OwnedSemaphorePermit,
}

impl PooledConnection {
    pub async fn fetch_rows(
        &mut self,
        sql: &str,
        params: &[ParamValue],
    ) -> Result<Vec<Row>, sqlx::Error> {
        let Some(session) = self.session.as_mut() else {
            return Err(sqlx::Error::PoolClosed);
        };
        self.in_flight = true;
        let rows = session.fetch_rows(sql, params).await;
        self.in_flight = false;
        rows
    }

    pub async fn ping(&mut self) -> Result<(), sqlx::Error> {
        let Some(session) = self.session.as_mut() else {
            return Err(sqlx::Error::PoolClosed);
        };
        self.in_flight = true;
        let result = session.ping().await;
        self.in_flight = false;
        result
    }

    /// Give the session back to the pool.
    pub fn release(self) {}

    /// Drop the session instead of parking it; the capacity slot still frees.
    pub fn discard(mut self) {
        if let Some(session) = self.session.take() {
            self.pool.forget(session);
        }
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            if self.in_flight {
                tracing::debug!("lease dropped mid-statement, discarding session");
                self.pool.forget(session);
            } else {
                self.pool.restore(session);
            }
        }
    }
}
