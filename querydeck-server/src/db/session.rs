//! Backend seam: a `Connector` opens `Session`s, a `Session` runs one
//! statement at a time.

use async_trait::async_trait;

use crate::query::ParamValue;

/// One result row: column name → JSON value, in select-list order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Opens new database sessions for the pool.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Short backend name for logs ("mysql", "sqlite").
    fn backend(&self) -> &'static str;

    async fn connect(&self) -> Result<Box<dyn Session>, sqlx::Error>;
}

/// A live database session. Owned by exactly one lease at a time.
#[async_trait]
pub trait Session: Send + 'static {
    /// Run `sql` with `params` bound positionally and decode every row.
    async fn fetch_rows(&mut self, sql: &str, params: &[ParamValue])
        -> Result<Vec<Row>, sqlx::Error>;

    async fn ping(&mut self) -> Result<(), sqlx::Error>;

    async fn close(self: Box<Self>) -> Result<(), sqlx::Error>;
}

/// Whether the session that produced `err` can no longer be trusted.
///
/// Statement-level errors (syntax, constraint, decode) leave the session
/// usable; transport-level ones do not.
pub fn is_connection_fault(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_poison_the_session() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(is_connection_fault(&sqlx::Error::Io(io)));
        assert!(!is_connection_fault(&sqlx::Error::RowNotFound));
        assert!(!is_connection_fault(&sqlx::Error::ColumnNotFound(
            "Ssn".into()
        )));
    }
}
