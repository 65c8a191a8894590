use super::*;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct One {
    pub id: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Many {
    pub ids: Vec<Value>,
}

impl One {
    pub fn new(id: impl Into<Value>) -> One {
        One { id: id.into() }
    }
}

impl From<One> for Operation {
    fn from(value: One) -> Self {
        Self::One(value)
    }
}

impl From<Many> for Operation {
    fn from(value: Many) -> Self {
        Self::Many(value)
    }
}
