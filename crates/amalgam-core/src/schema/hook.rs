//! Per-table hooks.
//!
//! Every hook can be given as a closure. The common cases also have a
//! declarative form naming a field, which is what the JSON configuration
//! produces.

use super::TableRows;
use crate::{driver::Operation, record, JoinKey, Record};

use serde_json::Value;
use std::sync::Arc;

/// Extracts the join key of a row.
#[derive(Clone)]
pub enum KeyFn {
    /// The key is the value of this physical column
    Field(String),

    /// The key is computed from the row and every table fetched for the
    /// request
    Func(Arc<dyn Fn(&Record, &TableRows) -> Value + Send + Sync>),
}

/// Builds the columns that tie a dependent row to the main row, given the
/// main row's identifier.
#[derive(Clone)]
pub enum ForeignKeyFn {
    /// Stamp the main identifier into this physical column
    Field(String),

    Func(Arc<dyn Fn(&Value) -> Record + Send + Sync>),
}

/// Recovers the identifier (or identifiers, for accumulate tables) of the
/// dependent rows to delete from the composite record being deleted.
#[derive(Clone)]
pub enum IdFn {
    /// Read this logical field of the composite record
    Field(String),

    Func(Arc<dyn Fn(&Record) -> Value + Send + Sync>),
}

/// Rewrites the logical payload of a create before it is split into tables.
pub type InitFn = Arc<dyn Fn(Record) -> Record + Send + Sync>;

/// Rewrites the read parameters sent to the main table.
pub type ParamsFn = Arc<dyn Fn(Operation) -> Operation + Send + Sync>;

impl KeyFn {
    pub fn func(f: impl Fn(&Record, &TableRows) -> Value + Send + Sync + 'static) -> KeyFn {
        KeyFn::Func(Arc::new(f))
    }

    /// Join key of `row`, or `None` when the row has no usable key.
    pub fn apply(&self, row: &Record, tables: &TableRows) -> Option<JoinKey> {
        match self {
            KeyFn::Field(name) => JoinKey::from_value(record::field(row, name)),
            KeyFn::Func(f) => JoinKey::from_value(&f(row, tables)),
        }
    }
}

impl ForeignKeyFn {
    pub fn func(f: impl Fn(&Value) -> Record + Send + Sync + 'static) -> ForeignKeyFn {
        ForeignKeyFn::Func(Arc::new(f))
    }

    pub fn apply(&self, main_id: &Value) -> Record {
        match self {
            ForeignKeyFn::Field(name) => {
                let mut columns = Record::new();
                columns.insert(name.clone(), main_id.clone());
                columns
            }
            ForeignKeyFn::Func(f) => f(main_id),
        }
    }
}

impl IdFn {
    pub fn func(f: impl Fn(&Record) -> Value + Send + Sync + 'static) -> IdFn {
        IdFn::Func(Arc::new(f))
    }

    pub fn apply(&self, previous: &Record) -> Value {
        match self {
            IdFn::Field(name) => record::field(previous, name).clone(),
            IdFn::Func(f) => f(previous),
        }
    }
}

impl core::fmt::Debug for KeyFn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            KeyFn::Field(name) => f.debug_tuple("Field").field(name).finish(),
            KeyFn::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl core::fmt::Debug for ForeignKeyFn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            ForeignKeyFn::Field(name) => f.debug_tuple("Field").field(name).finish(),
            ForeignKeyFn::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl core::fmt::Debug for IdFn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            IdFn::Field(name) => f.debug_tuple("Field").field(name).finish(),
            IdFn::Func(_) => f.write_str("Func(..)"),
        }
    }
}
