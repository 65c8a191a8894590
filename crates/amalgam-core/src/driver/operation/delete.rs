use super::*;

use crate::Record;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delete {
    pub id: Value,

    /// The record being deleted. Composite deletes read dependent row
    /// identifiers from it.
    #[serde(default)]
    pub previous_data: Option<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteMany {
    pub ids: Vec<Value>,
}

impl Delete {
    pub fn new(id: impl Into<Value>) -> Delete {
        Delete {
            id: id.into(),
            previous_data: None,
        }
    }

    pub fn previous_data(mut self, previous_data: Record) -> Delete {
        self.previous_data = Some(previous_data);
        self
    }
}

impl DeleteMany {
    pub fn new(ids: impl IntoIterator<Item = impl Into<Value>>) -> DeleteMany {
        DeleteMany {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Delete> for Operation {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}

impl From<DeleteMany> for Operation {
    fn from(value: DeleteMany) -> Self {
        Self::DeleteMany(value)
    }
}
