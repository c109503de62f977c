//! SQLite backend for local runs and tests.
//!
//! SQLite values carry their own storage class, so decoding follows the
//! runtime type of each value rather than the declared column type.

use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, Connection, Row as _, TypeInfo, ValueRef};

use super::session::{Connector, Row, Session};
use crate::query::ParamValue;

/// Opens [`SqliteConnection`]s from fixed connect options.
pub struct SqliteConnector {
    options: SqliteConnectOptions,
}

impl SqliteConnector {
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Connector for SqliteConnector {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn connect(&self) -> Result<Box<dyn Session>, sqlx::Error> {
        let conn = SqliteConnection::connect_with(&self.options).await?;
        Ok(Box::new(conn))
    }
}

#[async_trait]
impl Session for SqliteConnection {
    async fn fetch_rows(
        &mut self,
        sql: &str,
        params: &[ParamValue],
    ) -> Result<Vec<Row>, sqlx::Error> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                ParamValue::Text(text) => query.bind(text.clone()),
                ParamValue::Integer(n) => query.bind(*n),
            };
        }

        let rows = query.fetch_all(&mut *self).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn ping(&mut self) -> Result<(), sqlx::Error> {
        Connection::ping(self).await
    }

    async fn close(self: Box<Self>) -> Result<(), sqlx::Error> {
        Connection::close(*self).await
    }
}

fn decode_row(row: &SqliteRow) -> Result<Row, sqlx::Error> {
    let mut out = Row::new();
    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let storage = raw.type_info().name().to_string();
            decode_value(row, idx, &storage)?
        };
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}

fn decode_value(row: &SqliteRow, idx: usize, storage: &str) -> Result<Value, sqlx::Error> {
    let value = match storage {
        "INTEGER" => json!(row.try_get_unchecked::<i64, _>(idx)?),
        "REAL" => json!(row.try_get_unchecked::<f64, _>(idx)?),
        "BOOLEAN" => json!(row.try_get_unchecked::<bool, _>(idx)?),
        "BLOB" => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(idx)?;
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => Value::String(row.try_get_unchecked::<String, _>(idx)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    async fn memory() -> Box<dyn Session> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        SqliteConnector::new(options).connect().await.unwrap()
    }

    #[tokio::test]
    async fn decodes_by_storage_class_in_column_order() {
        let mut session = memory().await;
        let rows = session
            .fetch_rows(
                "SELECT 7 AS Zeta, 2.5 AS Alpha, 'x' AS Mid, NULL AS Gone",
                &[],
            )
            .await
            .unwrap();

        let keys: Vec<_> = rows[0].keys().cloned().collect();
        assert_eq!(keys, ["Zeta", "Alpha", "Mid", "Gone"]);
        assert_eq!(rows[0]["Zeta"], json!(7));
        assert_eq!(rows[0]["Alpha"], json!(2.5));
        assert_eq!(rows[0]["Mid"], json!("x"));
        assert_eq!(rows[0]["Gone"], Value::Null);
    }

    #[tokio::test]
    async fn binds_parameters_positionally() {
        let mut session = memory().await;
        let rows = session
            .fetch_rows(
                "SELECT ? AS Name, ? + 1 AS Next",
                &[ParamValue::Text("O'Brien".into()), ParamValue::Integer(41)],
            )
            .await
            .unwrap();

        assert_eq!(rows[0]["Name"], json!("O'Brien"));
        assert_eq!(rows[0]["Next"], json!(42));
    }
}
