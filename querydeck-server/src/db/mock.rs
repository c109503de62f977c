//! In-memory connector for unit tests.
//!
//! Every session answers every statement with the same canned rows, except
//! [`SESSION_ID_SQL`], which echoes the session's id.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::session::{Connector, Row, Session};
use crate::query::ParamValue;

pub(crate) const SESSION_ID_SQL: &str = "SELECT session_id";

/// How canned statements fail
#[derive(Debug, Clone, Copy)]
pub(crate) enum MockFailure {
    /// Statement-level error; the session stays usable
    Statement,
    /// Transport error; the session is poisoned
    ConnectionReset,
}

impl MockFailure {
    fn to_error(self) -> sqlx::Error {
        match self {
            Self::Statement => sqlx::Error::ColumnNotFound("Missing_column".into()),
            Self::ConnectionReset => sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            )),
        }
    }
}

#[derive(Default)]
struct MockState {
    rows: Mutex<Vec<Row>>,
    failure: Mutex<Option<MockFailure>>,
    delay: Mutex<Option<Duration>>,
    refuse: AtomicBool,
    connects: AtomicUsize,
    closes: AtomicUsize,
    executed: Mutex<Vec<(String, Vec<ParamValue>)>>,
}

#[derive(Clone, Default)]
pub(crate) struct MockConnector {
    state: Arc<MockState>,
}

impl MockConnector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_rows(self, rows: Vec<serde_json::Value>) -> Self {
        let rows = rows
            .into_iter()
            .filter_map(|row| match row {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        *self.state.rows.lock().unwrap() = rows;
        self
    }

    pub(crate) fn failing(self, failure: MockFailure) -> Self {
        *self.state.failure.lock().unwrap() = Some(failure);
        self
    }

    pub(crate) fn with_delay(self, delay: Duration) -> Self {
        *self.state.delay.lock().unwrap() = Some(delay);
        self
    }

    pub(crate) fn refusing_connections(self) -> Self {
        self.state.refuse.store(true, Ordering::SeqCst);
        self
    }

    pub(crate) fn connects(&self) -> usize {
        self.state.connects.load(Ordering::SeqCst)
    }

    pub(crate) fn closes(&self) -> usize {
        self.state.closes.load(Ordering::SeqCst)
    }

    /// Statements run so far, with their bound parameters.
    pub(crate) fn executed(&self) -> Vec<(String, Vec<ParamValue>)> {
        self.state.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for MockConnector {
    fn backend(&self) -> &'static str {
        "mock"
    }

    async fn connect(&self) -> Result<Box<dyn Session>, sqlx::Error> {
        if self.state.refuse.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        let id = self.state.connects.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Box::new(MockSession {
            id,
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockSession {
    id: usize,
    state: Arc<MockState>,
}

#[async_trait]
impl Session for MockSession {
    async fn fetch_rows(
        &mut self,
        sql: &str,
        params: &[ParamValue],
    ) -> Result<Vec<Row>, sqlx::Error> {
        if sql == SESSION_ID_SQL {
            let mut row = Row::new();
            row.insert("session_id".into(), json!(self.id));
            return Ok(vec![row]);
        }

        self.state
            .executed
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));

        let delay = *self.state.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = *self.state.failure.lock().unwrap();
        match failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(self.state.rows.lock().unwrap().clone()),
        }
    }

    async fn ping(&mut self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), sqlx::Error> {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
