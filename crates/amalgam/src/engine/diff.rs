//! Set-diff of accumulate columns.
//!
//! An accumulate table reaches the write path as one record of parallel
//! arrays, one array per physical column. Entry `i` of the table is the
//! tuple of every column's value at index `i`. Entries are matched between
//! the previous and the new record by the values of their non-`id` columns,
//! never by position, so reordering an array is not a change.

use amalgam_core::{
    record::{self, ID},
    Record,
};

use serde_json::Value;
use std::collections::HashSet;

/// Writes needed to turn the previous entries into the new ones.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Diff {
    /// Identifiers of previous entries whose values are gone
    pub(crate) delete: Vec<Value>,

    /// New entries whose values were not there before, as rows to insert
    pub(crate) create: Vec<Record>,
}

pub(crate) fn diff(previous: Option<&Record>, data: &Record) -> Diff {
    let empty = Record::new();
    let previous = previous.unwrap_or(&empty);
    let columns = value_columns(previous, data);

    let previous_entries = entries(previous, &columns);
    let data_entries = entries(data, &columns);

    let previous_keys: HashSet<_> = previous_entries.iter().map(|entry| entry_key(entry)).collect();
    let data_keys: HashSet<_> = data_entries.iter().map(|entry| entry_key(entry)).collect();

    let previous_ids = record::column(record::field(previous, ID));
    let delete = previous_entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| !data_keys.contains(&entry_key(entry)))
        .filter_map(|(index, _)| match previous_ids.get(index) {
            Some(id) if !id.is_null() => Some(id.clone()),
            _ => {
                log::trace!("removed entry #{index} has no id; nothing to delete");
                None
            }
        })
        .collect();

    let create = data_entries
        .iter()
        .filter(|entry| !previous_keys.contains(&entry_key(entry)))
        .map(|entry| {
            columns
                .iter()
                .zip(entry.iter())
                .filter(|(column, _)| data.contains_key(column.as_str()))
                .map(|(column, value)| (column.clone(), (*value).clone()))
                .collect()
        })
        .collect();

    Diff { delete, create }
}

/// Identifiers of the table after the diff has been applied: the ids listed
/// in the new record that were not deleted, followed by the ids of the newly
/// created rows in creation order.
pub(crate) fn reconcile(data: &Record, deleted: &[Value], created: Vec<Value>) -> Vec<Value> {
    record::column(record::field(data, ID))
        .iter()
        .filter(|id| !deleted.contains(id))
        .cloned()
        .chain(created)
        .collect()
}

/// Non-`id` columns present on either side, new record first.
fn value_columns(previous: &Record, data: &Record) -> Vec<String> {
    let mut columns: Vec<String> = vec![];
    for name in data.keys().chain(previous.keys()) {
        if name != ID && !columns.contains(name) {
            columns.push(name.clone());
        }
    }
    columns
}

/// Entry tuples of one side. The side has as many entries as its longest
/// value column.
fn entries<'a>(record: &'a Record, columns: &[String]) -> Vec<Vec<&'a Value>> {
    let arrays: Vec<&[Value]> = columns
        .iter()
        .map(|column| record::column(record::field(record, column)))
        .collect();
    let len = arrays.iter().map(|values| values.len()).max().unwrap_or(0);

    (0..len)
        .map(|index| {
            arrays
                .iter()
                .map(|values| values.get(index).unwrap_or(&Value::Null))
                .collect()
        })
        .collect()
}

fn entry_key(entry: &[&Value]) -> String {
    let mut key = String::new();
    for value in entry {
        key.push_str(&value.to_string());
        key.push('\u{1f}');
    }
    key
}
