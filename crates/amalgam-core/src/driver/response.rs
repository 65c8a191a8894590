use crate::{record::ID, Error, Record, Result};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of an operation.
///
/// A composite resource answers with exactly the shape a single table would,
/// which is what lets it stand in for one: `data` holds the rows of a list
/// read, the row of a single-record operation, or the identifiers of a
/// multi-record delete, and `total` is set by list reads only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub data: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl Response {
    pub fn new(data: impl Into<Value>) -> Response {
        Response {
            data: data.into(),
            total: None,
        }
    }

    pub fn list(rows: Vec<Record>, total: u64) -> Response {
        Response {
            data: Value::Array(rows.into_iter().map(Value::Object).collect()),
            total: Some(total),
        }
    }

    pub fn record(record: Record) -> Response {
        Response::new(Value::Object(record))
    }

    /// The `total` of a list read.
    pub fn total(&self) -> Result<u64> {
        self.total
            .ok_or_else(|| Error::invalid_response("list response has no `total`"))
    }

    /// Converts `data` into rows.
    ///
    /// A single object is one row and `null` is no rows, so single-record
    /// responses can be aggregated the same way list responses are.
    pub fn into_rows(self) -> Result<Vec<Record>> {
        match self.data {
            Value::Null => Ok(vec![]),
            Value::Object(row) => Ok(vec![row]),
            Value::Array(values) => values
                .into_iter()
                .map(|value| match value {
                    Value::Object(row) => Ok(row),
                    other => Err(Error::invalid_response(format!(
                        "expected a row, got `{other}`"
                    ))),
                })
                .collect(),
            other => Err(Error::invalid_response(format!(
                "expected rows, got `{other}`"
            ))),
        }
    }

    /// Converts `data` into a single record, or `None` when it is `null`.
    pub fn into_record(self) -> Result<Option<Record>> {
        match self.data {
            Value::Null => Ok(None),
            Value::Object(record) => Ok(Some(record)),
            other => Err(Error::invalid_response(format!(
                "expected a record, got `{other}`"
            ))),
        }
    }

    /// Identifier carried by `data`.
    ///
    /// Stores answer writes either with the affected row or with its bare
    /// identifier; both are accepted.
    pub fn id(&self) -> Result<Value> {
        match &self.data {
            Value::Object(row) => match row.get(ID) {
                Some(id) if !id.is_null() => Ok(id.clone()),
                _ => Err(Error::invalid_response("row has no `id`")),
            },
            Value::Null | Value::Array(_) => Err(Error::invalid_response(format!(
                "expected a row or an identifier, got `{}`",
                self.data
            ))),
            id => Ok(id.clone()),
        }
    }
}
