//! Rows, composite records, and the keys that correlate them.

use serde_json::Value;

/// A single row or composite record: field name to value, in insertion order.
pub type Record = serde_json::Map<String, Value>;

/// Name of the physical identifier column.
pub const ID: &str = "id";

/// Value used to correlate rows of different tables with one composite record.
///
/// Keys compare by their canonical text, so a numeric `1` in one table matches
/// a string `"1"` in another. `null` never produces a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoinKey(String);

impl JoinKey {
    pub fn from_value(value: &Value) -> Option<JoinKey> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(JoinKey(s.clone())),
            Value::Number(n) => Some(JoinKey(n.to_string())),
            Value::Bool(b) => Some(JoinKey(b.to_string())),
            other => Some(JoinKey(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for JoinKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads a field of `record`, treating a missing field as `null`.
pub fn field<'a>(record: &'a Record, name: &str) -> &'a Value {
    record.get(name).unwrap_or(&Value::Null)
}

/// Views an array-valued field as a slice.
///
/// A missing or `null` field is an empty array and a scalar is a one element
/// array, which is how accumulate columns are read on the write path.
pub fn column(value: &Value) -> &[Value] {
    match value {
        Value::Null => &[],
        Value::Array(values) => values,
        scalar => core::slice::from_ref(scalar),
    }
}
