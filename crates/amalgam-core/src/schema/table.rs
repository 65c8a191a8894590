use super::{FieldSpec, ForeignKeyFn, IdFn, InitFn, KeyFn, ParamsFn};
use crate::{driver::Operation, record::ID, Record};

use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// Rows fetched for one request, by table name, in mapping declaration order.
pub type TableRows = IndexMap<String, Vec<Record>>;

/// How one physical table takes part in a mapping set.
///
/// Built with [`TableMapping::main`] or [`TableMapping::secondary`] and the
/// chained setters below. The join key defaults to the `id` column; secondary
/// tables almost always override it with the column referencing the main row.
#[derive(Clone)]
pub struct TableMapping {
    /// Physical table name, as passed to the driver
    pub name: String,

    /// The main table anchors the join key and owns the caller-visible
    /// identifier
    pub main: bool,

    /// Columns surfaced in the composite record, in declaration order
    pub fields: Vec<FieldSpec>,

    /// Join key extraction
    pub key: KeyFn,

    /// Many rows of this table collapse into array-valued fields
    pub accumulate: bool,

    /// Stamps the main identifier onto rows written after the main row
    pub foreign_key: Option<ForeignKeyFn>,

    /// Recovers dependent identifiers on delete
    pub id: Option<IdFn>,

    /// Pre-processes the logical payload of a create
    pub init_data: Option<InitFn>,

    /// Overrides the read parameters of the main table
    pub params: Option<ParamsFn>,
}

impl TableMapping {
    pub fn main(name: impl Into<String>) -> TableMapping {
        TableMapping::new(name, true)
    }

    pub fn secondary(name: impl Into<String>) -> TableMapping {
        TableMapping::new(name, false)
    }

    fn new(name: impl Into<String>, main: bool) -> TableMapping {
        TableMapping {
            name: name.into(),
            main,
            fields: vec![],
            key: KeyFn::Field(ID.to_string()),
            accumulate: false,
            foreign_key: None,
            id: None,
            init_data: None,
            params: None,
        }
    }

    pub fn field(mut self, field: impl Into<FieldSpec>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldSpec>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Adds a column that is renamed in the composite record.
    pub fn alias(mut self, name: impl Into<String>, alias: impl Into<String>) -> Self {
        self.fields.push(FieldSpec::aliased(name, alias));
        self
    }

    pub fn key_field(mut self, name: impl Into<String>) -> Self {
        self.key = KeyFn::Field(name.into());
        self
    }

    pub fn key(mut self, f: impl Fn(&Record, &TableRows) -> Value + Send + Sync + 'static) -> Self {
        self.key = KeyFn::func(f);
        self
    }

    pub fn accumulate(mut self) -> Self {
        self.accumulate = true;
        self
    }

    pub fn foreign_key_field(mut self, name: impl Into<String>) -> Self {
        self.foreign_key = Some(ForeignKeyFn::Field(name.into()));
        self
    }

    pub fn foreign_key(mut self, f: impl Fn(&Value) -> Record + Send + Sync + 'static) -> Self {
        self.foreign_key = Some(ForeignKeyFn::func(f));
        self
    }

    pub fn id_field(mut self, name: impl Into<String>) -> Self {
        self.id = Some(IdFn::Field(name.into()));
        self
    }

    pub fn id(mut self, f: impl Fn(&Record) -> Value + Send + Sync + 'static) -> Self {
        self.id = Some(IdFn::func(f));
        self
    }

    pub fn init_data(mut self, f: impl Fn(Record) -> Record + Send + Sync + 'static) -> Self {
        self.init_data = Some(Arc::new(f));
        self
    }

    pub fn params(mut self, f: impl Fn(Operation) -> Operation + Send + Sync + 'static) -> Self {
        self.params = Some(Arc::new(f));
        self
    }

    /// Finds the field surfaced under `logical` and returns its physical
    /// column name.
    pub fn physical_name(&self, logical: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.logical_name() == logical)
            .map(FieldSpec::physical_name)
    }

    /// Applies the `params` hook, if any.
    pub fn read_params(&self, op: Operation) -> Operation {
        match &self.params {
            Some(f) => f(op),
            None => op,
        }
    }
}

impl core::fmt::Debug for TableMapping {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let func = |hook: bool| if hook { Some("Func(..)") } else { None };

        f.debug_struct("TableMapping")
            .field("name", &self.name)
            .field("main", &self.main)
            .field("fields", &self.fields)
            .field("key", &self.key)
            .field("accumulate", &self.accumulate)
            .field("foreign_key", &self.foreign_key)
            .field("id", &self.id)
            .field("init_data", &func(self.init_data.is_some()))
            .field("params", &func(self.params.is_some()))
            .finish()
    }
}
