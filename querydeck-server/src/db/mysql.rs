//! MySQL backend
//!
//! Column values are decoded by their declared type into JSON. DECIMAL comes
//! back as a string so no digits are lost. DATE is `YYYY-MM-DD`; DATETIME and
//! TIMESTAMP are ISO-8601 with milliseconds and a `Z` suffix, read as UTC.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column, Connection, Row as _, TypeInfo, ValueRef};

use super::session::{Connector, Row, Session};
use crate::query::ParamValue;

/// Opens [`MySqlConnection`]s from fixed connect options.
pub struct MySqlConnector {
    options: MySqlConnectOptions,
}

impl MySqlConnector {
    pub fn new(options: MySqlConnectOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    fn backend(&self) -> &'static str {
        "mysql"
    }

    async fn connect(&self) -> Result<Box<dyn Session>, sqlx::Error> {
        let conn = MySqlConnection::connect_with(&self.options).await?;
        Ok(Box::new(conn))
    }
}

#[async_trait]
impl Session for MySqlConnection {
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

fn decode_row(row: &MySqlRow) -> Result<Row, sqlx::Error> {
    let mut out = Row::new();
    for column in row.columns() {
        let idx = column.ordinal();
        let value = if row.try_get_raw(idx)?.is_null() {
            Value::Null
        } else {
            decode_value(row, idx, column.type_info().name())?
        };
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}

fn decode_value(row: &MySqlRow, idx: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    let value = match type_name {
        "BOOLEAN" => json!(row.try_get::<bool, _>(idx)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            json!(row.try_get_unchecked::<i64, _>(idx)?)
        }
        "YEAR" => json!(row.try_get_unchecked::<u16, _>(idx)?),
        name if name.ends_with("INT UNSIGNED") => {
            json!(row.try_get_unchecked::<u64, _>(idx)?)
        }
        "FLOAT" => json!(f64::from(row.try_get::<f32, _>(idx)?)),
        "DOUBLE" => json!(row.try_get::<f64, _>(idx)?),
        "DECIMAL" => Value::String(row.try_get::<Decimal, _>(idx)?.to_string()),
        "DATE" => Value::String(format_date(row.try_get(idx)?)),
        "DATETIME" | "TIMESTAMP" => Value::String(format_datetime(row.try_get(idx)?)),
        "TIME" => Value::String(row.try_get::<NaiveTime, _>(idx)?.to_string()),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(idx)?;
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }
        // CHAR, VARCHAR, TEXT, ENUM, SET, JSON
        _ => Value::String(row.try_get_unchecked::<String, _>(idx)?),
    };
    Ok(value)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn format_datetime(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn temporal_values_format_as_iso_text() {
        let date = NaiveDate::from_ymd_opt(1965, 1, 9).unwrap();
        assert_eq!(format_date(date), "1965-01-09");
        assert_eq!(
            format_datetime(date.and_hms_opt(9, 5, 0).unwrap()),
            "1965-01-09T09:05:00.000Z"
        );
        assert_eq!(
            format_datetime(date.and_hms_milli_opt(23, 59, 59, 250).unwrap()),
            "1965-01-09T23:59:59.250Z"
        );
    }

    // Run with: DATABASE_URL=mysql://... cargo test -p querydeck-server -- --ignored

    async fn session() -> Box<dyn Session> {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let options = MySqlConnectOptions::from_str(&url).expect("invalid DATABASE_URL");
        MySqlConnector::new(options)
            .connect()
            .await
            .expect("connection failed")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn decodes_column_types() {
        let mut session = session().await;
        let rows = session
            .fetch_rows(
                "SELECT CAST(1.50 AS DECIMAL(5,2)) AS Price, \
                        DATE '1965-01-09' AS Bdate, \
                        TIMESTAMP '2024-11-20 09:05:00' AS Alert_Time, \
                        CAST(1 AS UNSIGNED) AS Hits, \
                        CAST(-7 AS SIGNED) AS Delta, \
                        'Smith' AS Lname, \
                        NULL AS Super_ssn",
                &[],
            )
            .await
            .expect("query failed");

        let row = &rows[0];
        let keys: Vec<_> = row.keys().cloned().collect();
        assert_eq!(
            keys,
            [
                "Price",
                "Bdate",
                "Alert_Time",
                "Hits",
                "Delta",
                "Lname",
                "Super_ssn",
            ]
        );
        assert_eq!(row["Price"], json!("1.50"));
        assert_eq!(row["Bdate"], json!("1965-01-09"));
        assert_eq!(row["Alert_Time"], json!("2024-11-20T09:05:00.000Z"));
        assert_eq!(row["Hits"], json!(1));
        assert_eq!(row["Delta"], json!(-7));
        assert_eq!(row["Lname"], json!("Smith"));
        assert_eq!(row["Super_ssn"], Value::Null);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn decodes_boolean_columns() {
        let mut session = session().await;
        session
            .fetch_rows("CREATE TEMPORARY TABLE flags (Resolved BOOLEAN)", &[])
            .await
            .expect("create failed");
        session
            .fetch_rows("INSERT INTO flags VALUES (TRUE), (FALSE)", &[])
            .await
            .expect("insert failed");

        let rows = session
            .fetch_rows("SELECT Resolved FROM flags ORDER BY Resolved DESC", &[])
            .await
            .expect("query failed");
        assert_eq!(rows[0]["Resolved"], json!(true));
        assert_eq!(rows[1]["Resolved"], json!(false));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn binds_parameters_positionally() {
        let mut session = session().await;
        let rows = session
            .fetch_rows(
                "SELECT ? AS Name, ? + 1 AS Next",
                &[ParamValue::Text("O'Brien".into()), ParamValue::Integer(41)],
            )
            .await
            .expect("query failed");

        assert_eq!(rows[0]["Name"], json!("O'Brien"));
        assert_eq!(rows[0]["Next"], json!(42));
    }
}
