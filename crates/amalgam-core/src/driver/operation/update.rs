use super::*;

use crate::Record;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    pub id: Value,
    pub data: Record,

    /// The record as the caller last saw it. Composite updates need it to
    /// diff accumulate fields.
    #[serde(default)]
    pub previous_data: Option<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMany {
    pub ids: Vec<Value>,
    pub data: Record,
}

impl Update {
    pub fn new(id: impl Into<Value>, data: Record) -> Update {
        Update {
            id: id.into(),
            data,
            previous_data: None,
        }
    }

    pub fn previous_data(mut self, previous_data: Record) -> Update {
        self.previous_data = Some(previous_data);
        self
    }
}

impl From<Update> for Operation {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}

impl From<UpdateMany> for Operation {
    fn from(value: UpdateMany) -> Self {
        Self::UpdateMany(value)
    }
}
