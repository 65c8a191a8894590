use super::*;

use crate::Record;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub pagination: Pagination,
    pub sort: Sort,

    /// Field equality constraints. An array value matches any of its elements.
    #[serde(default)]
    pub filter: Record,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManyReference {
    /// Field of the listed rows that references `id`
    pub target: String,
    pub id: Value,
    pub pagination: Pagination,
    pub sort: Sort,
    #[serde(default)]
    pub filter: Record,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64) -> Pagination {
        Pagination { page, per_page }
    }
}

impl Sort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Sort {
        Sort {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Sort {
        Sort::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Sort {
        Sort::new(field, SortOrder::Desc)
    }
}

impl List {
    pub fn new(pagination: Pagination, sort: Sort) -> List {
        List {
            pagination,
            sort,
            filter: Record::new(),
        }
    }

    pub fn filter(mut self, filter: Record) -> List {
        self.filter = filter;
        self
    }
}

impl From<List> for Operation {
    fn from(value: List) -> Self {
        Self::List(value)
    }
}

impl From<ManyReference> for Operation {
    fn from(value: ManyReference) -> Self {
        Self::ManyReference(value)
    }
}
