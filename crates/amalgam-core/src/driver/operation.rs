mod create;
pub use create::Create;

mod delete;
pub use delete::{Delete, DeleteMany};

mod list;
pub use list::{List, ManyReference, Pagination, Sort, SortOrder};

mod one;
pub use one::{Many, One};

mod update;
pub use update::{Update, UpdateMany};

use super::*;
use crate::schema::MappingKind;

use serde::{Deserialize, Serialize};

/// A request against a table or logical resource.
///
/// The variants mirror the request kinds a generic CRUD client issues. The
/// engine only ever sends `List`, `One`, `Create`, `Update` and `Delete` to
/// the store itself; the remaining kinds reach the store through passthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    /// Read a page of rows
    List(List),

    /// Read one row by identifier
    One(One),

    /// Read several rows by identifier
    Many(Many),

    /// Read a page of rows referencing another record
    ManyReference(ManyReference),

    /// Insert a row; the store assigns the identifier
    Create(Create),

    /// Update one row by identifier
    Update(Update),

    /// Apply the same update to several rows
    UpdateMany(UpdateMany),

    /// Delete one row by identifier
    Delete(Delete),

    /// Delete several rows by identifier
    DeleteMany(DeleteMany),
}

impl Operation {
    /// Which mapping set serves this request kind, if any.
    ///
    /// Kinds without a mapping set are always passed through to the store,
    /// even for resources that are registered.
    pub fn mapping_kind(&self) -> Option<MappingKind> {
        match self {
            Operation::List(_) => Some(MappingKind::List),
            Operation::One(_) | Operation::Update(_) => Some(MappingKind::Edit),
            Operation::Create(_) => Some(MappingKind::Create),
            Operation::Delete(_) | Operation::DeleteMany(_) => Some(MappingKind::Delete),
            Operation::Many(_) | Operation::ManyReference(_) | Operation::UpdateMany(_) => None,
        }
    }

    /// Short upper-case name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::List(_) => "LIST",
            Operation::One(_) => "ONE",
            Operation::Many(_) => "MANY",
            Operation::ManyReference(_) => "MANY_REFERENCE",
            Operation::Create(_) => "CREATE",
            Operation::Update(_) => "UPDATE",
            Operation::UpdateMany(_) => "UPDATE_MANY",
            Operation::Delete(_) => "DELETE",
            Operation::DeleteMany(_) => "DELETE_MANY",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Operation::List(_))
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Operation::Create(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Operation::Update(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Operation::Delete(_))
    }
}
