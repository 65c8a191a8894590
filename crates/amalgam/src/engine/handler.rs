mod create;
mod delete;
mod delete_many;
mod list;
mod one;
mod update;

use super::{
    aggregate::{aggregate, attach_columns},
    Engine,
};

use amalgam_core::{
    driver::{Operation, Response},
    record::ID,
    schema::{MappingSet, TableRows},
    Error, Record, Result,
};

use serde_json::Value;

impl Engine {
    /// Serves a request against a composite resource.
    ///
    /// `set` must be the mapping set registered for the request's
    /// [`mapping_kind`](Operation::mapping_kind).
    pub(crate) async fn handle(&self, set: &MappingSet, op: Operation) -> Result<Response> {
        match op {
            Operation::List(list) => self.handle_list(set, list).await,
            Operation::One(one) => self.handle_one(set, one).await,
            Operation::Update(update) => self.handle_update(set, update).await,
            Operation::Create(create) => self.handle_create(set, create).await,
            Operation::Delete(delete) => self.handle_delete(set, delete).await,
            Operation::DeleteMany(delete_many) => self.handle_delete_many(set, delete_many).await,
            op @ (Operation::Many(_) | Operation::ManyReference(_) | Operation::UpdateMany(_)) => {
                Err(Error::invalid_request(format!(
                    "{} requests are not served for composite resources",
                    op.name()
                )))
            }
        }
    }
}

/// What one dependent write hands back for aggregation.
enum Written {
    /// Rows returned by a plain table
    Rows(String, Vec<Record>),

    /// Reconciled columns of an accumulate table
    Columns(String, Record),
}

/// Row the store returned for a write.
///
/// Stores may answer a write with the affected row, with its bare
/// identifier, or with nothing; the last two fall back to the row that was
/// sent.
fn returned_row(response: Response, mut sent: Record) -> Vec<Record> {
    match response.data {
        Value::Object(row) => vec![row],
        Value::Null | Value::Array(_) => vec![sent],
        id => {
            sent.insert(ID.to_string(), id);
            vec![sent]
        }
    }
}

/// Builds the single composite a write produces, stamped with the main
/// identifier, from the main table's rows and what the dependent tables
/// returned.
fn written_record(
    set: &MappingSet,
    main_rows: Vec<Record>,
    written: Vec<Written>,
    id: Value,
) -> Record {
    let mut rows = TableRows::new();
    rows.insert(set.main().name.clone(), main_rows);

    let mut columns = vec![];
    for written in written {
        match written {
            Written::Rows(table, table_rows) => {
                rows.insert(table, table_rows);
            }
            Written::Columns(table, values) => columns.push((table, values)),
        }
    }

    let mut composite = aggregate(set, &rows)
        .into_values()
        .next()
        .unwrap_or_default();

    for (table, values) in &columns {
        if let Some(table) = set.get(table) {
            attach_columns(&mut composite, table, values);
        }
    }

    composite.insert(ID.to_string(), id);
    composite
}
