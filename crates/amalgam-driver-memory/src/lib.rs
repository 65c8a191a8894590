mod table;
use table::Table;

use amalgam_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    Record, Result,
};

use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Mutex;

/// An in-process store of named tables.
///
/// Rows are JSON objects identified by their `id` column. Tables spring into
/// existence on first use and hand out auto-incrementing integer identifiers
/// to rows created without one. Reads are paginated and report the number of
/// matching rows in `total`, the way a REST data source would.
#[derive(Debug, Default)]
pub struct MemoryDriver {
    tables: Mutex<IndexMap<String, Table>>,
}

impl MemoryDriver {
    pub fn new() -> MemoryDriver {
        MemoryDriver::default()
    }

    /// Inserts rows directly, bypassing the driver interface.
    pub fn seed(&self, table: &str, rows: impl IntoIterator<Item = Record>) -> &Self {
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(table.to_string()).or_default();
        for row in rows {
            table.create(row);
        }
        self
    }

    /// Snapshot of a table's rows, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Record> {
        let tables = self.tables.lock().unwrap();
        tables
            .get(table)
            .map(|table| table.rows().to_vec())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    async fn exec(&self, table: &str, op: Operation) -> Result<Response> {
        let mut tables = self.tables.lock().unwrap();
        let name = table;
        let table = tables.entry(name.to_string()).or_default();

        log::trace!("memory: {} `{name}`", op.name());

        let response = match op {
            Operation::List(list) => {
                let (rows, total) = table.list(&list.filter, &list.sort, list.pagination);
                Response::list(rows, total)
            }
            Operation::One(one) => Response::record(table.get(name, &one.id)?.clone()),
            Operation::Many(many) => {
                let rows = many
                    .ids
                    .iter()
                    .filter_map(|id| table.find(id).cloned().map(Value::Object))
                    .collect();
                Response::new(Value::Array(rows))
            }
            Operation::ManyReference(reference) => {
                let mut filter = reference.filter;
                filter.insert(reference.target, reference.id);
                let (rows, total) = table.list(&filter, &reference.sort, reference.pagination);
                Response::list(rows, total)
            }
            Operation::Create(create) => Response::record(table.create(create.data)),
            Operation::Update(update) => {
                Response::record(table.update(name, &update.id, update.data)?)
            }
            Operation::UpdateMany(update_many) => {
                let mut ids = vec![];
                for id in update_many.ids {
                    table.update(name, &id, update_many.data.clone())?;
                    ids.push(id);
                }
                Response::new(Value::Array(ids))
            }
            Operation::Delete(delete) => Response::record(table.delete(name, &delete.id)?),
            Operation::DeleteMany(delete_many) => {
                let ids = delete_many
                    .ids
                    .into_iter()
                    .filter(|id| table.delete(name, id).is_ok())
                    .collect();
                Response::new(Value::Array(ids))
            }
        };

        Ok(response)
    }
}
