//! Query definitions, bind parameters and results
//!
//! A [`QueryDefinition`] is a named, versioned, static SQL template. The only
//! runtime input is a short list of typed parameters bound positionally by
//! the driver; SQL text is never assembled from request data.

pub mod catalog;
pub mod executor;

pub use executor::{QueryExecutor, DEFAULT_QUERY_TIMEOUT};

use std::fmt;

use serde::Serialize;

use crate::db::Row;
use crate::error::QueryError;

/// Declared type of a bind parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Text,
    Integer,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Integer => f.write_str("integer"),
        }
    }
}

/// A parameter slot in a definition: `?` placeholders are filled in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: ParamType,
}

impl ParamSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::Text,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::Integer,
        }
    }
}

/// A bound value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
}

impl ParamValue {
    pub fn ty(&self) -> ParamType {
        match self {
            Self::Text(_) => ParamType::Text,
            Self::Integer(_) => ParamType::Integer,
        }
    }

    /// Parse raw request text as `ty`.
    pub fn parse(ty: ParamType, raw: &str) -> Option<Self> {
        match ty {
            ParamType::Text => Some(Self::Text(raw.to_string())),
            ParamType::Integer => raw.trim().parse().ok().map(Self::Integer),
        }
    }
}

/// Named parameters in bind order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    names: Vec<String>,
    values: Vec<ParamValue>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: ParamValue) -> &mut Self {
        self.names.push(name.into());
        self.values.push(value);
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.push(name, value);
        self
    }

    pub fn values(&self) -> &[ParamValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.names.iter().map(String::as_str).zip(self.values.iter())
    }
}

/// Named, versioned, static SQL template
#[derive(Debug, Serialize)]
pub struct QueryDefinition {
    pub name: &'static str,
    pub version: u32,
    #[serde(skip)]
    pub sql: &'static str,
    pub parameters: &'static [ParamSpec],
    /// Row order the SQL guarantees; documentation only.
    pub ordering: &'static str,
}

impl QueryDefinition {
    /// `name@vN`, as used in logs.
    pub fn id(&self) -> String {
        format!("{}@v{}", self.name, self.version)
    }

    /// Check `params` against the declared parameters: same count, names in
    /// the same order, matching types.
    pub fn check_params(&self, params: &QueryParams) -> Result<(), QueryError> {
        let mismatch = |reason: String| QueryError::ParameterMismatch {
            query: self.name,
            reason,
        };

        if params.len() != self.parameters.len() {
            return Err(mismatch(format!(
                "expected {} parameter(s), got {}",
                self.parameters.len(),
                params.len()
            )));
        }

        let pairs = self.parameters.iter().zip(params.iter());
        for (position, (spec, (name, value))) in pairs.enumerate() {
            if spec.name != name {
                return Err(mismatch(format!(
                    "parameter {} should be '{}', got '{}'",
                    position + 1,
                    spec.name,
                    name
                )));
            }
            if spec.ty != value.ty() {
                return Err(mismatch(format!(
                    "parameter '{}' should be {}, got {}",
                    spec.name,
                    spec.ty,
                    value.ty()
                )));
            }
        }

        Ok(())
    }
}

/// Rows from one execution, in the order the SQL produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub row_count: usize,
}

impl QueryResult {
    pub fn new(rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        Self { rows, row_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static LOOKUP: QueryDefinition = QueryDefinition {
        name: "test.lookup",
        version: 1,
        sql: "SELECT * FROM T WHERE A = ? AND B = ?",
        parameters: &[ParamSpec::text("A"), ParamSpec::integer("B")],
        ordering: "unordered",
    };

    #[test]
    fn matching_params_pass() {
        let params = QueryParams::new()
            .with("A", ParamValue::Text("x".into()))
            .with("B", ParamValue::Integer(3));
        assert!(LOOKUP.check_params(&params).is_ok());
    }

    #[test]
    fn wrong_count_is_a_mismatch() {
        let params = QueryParams::new().with("A", ParamValue::Text("x".into()));
        let err = LOOKUP.check_params(&params).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter mismatch for query 'test.lookup': expected 2 parameter(s), got 1"
        );
    }

    #[test]
    fn swapped_order_is_a_mismatch() {
        let params = QueryParams::new()
            .with("B", ParamValue::Integer(3))
            .with("A", ParamValue::Text("x".into()));
        assert!(matches!(
            LOOKUP.check_params(&params),
            Err(QueryError::ParameterMismatch { .. })
        ));
    }

    #[test]
    fn wrong_type_is_a_mismatch() {
        let params = QueryParams::new()
            .with("A", ParamValue::Text("x".into()))
            .with("B", ParamValue::Text("3".into()));
        let err = LOOKUP.check_params(&params).unwrap_err();
        assert!(err.to_string().contains("'B' should be integer, got text"));
    }

    #[test]
    fn integer_parsing_rejects_garbage() {
        assert_eq!(
            ParamValue::parse(ParamType::Integer, " 12 "),
            Some(ParamValue::Integer(12))
        );
        assert_eq!(ParamValue::parse(ParamType::Integer, "12a"), None);
        assert_eq!(
            ParamValue::parse(ParamType::Text, "123456789"),
            Some(ParamValue::Text("123456789".into()))
        );
    }
}
