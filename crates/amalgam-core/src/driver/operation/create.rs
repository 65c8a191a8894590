use super::*;

use crate::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Create {
    pub data: Record,
}

impl Create {
    pub fn new(data: Record) -> Create {
        Create { data }
    }
}

impl From<Create> for Operation {
    fn from(value: Create) -> Self {
        Self::Create(value)
    }
}
