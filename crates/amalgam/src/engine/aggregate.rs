use amalgam_core::{
    schema::{FieldSpec, MappingSet, TableMapping, TableRows},
    JoinKey, Record,
};

use indexmap::IndexMap;
use serde_json::Value;

/// Merges rows fetched from the tables of a mapping set into composite
/// records, keyed by join key, in main-table row order.
///
/// Main-table rows seed the composites. Rows of other tables are folded into
/// the composite sharing their join key: accumulate tables append to
/// array-valued fields, others overwrite scalars. Rows that correlate with no
/// main row are dropped.
pub(crate) fn aggregate(set: &MappingSet, rows: &TableRows) -> IndexMap<JoinKey, Record> {
    let main = set.main();
    let mut composites = IndexMap::new();

    for row in rows_of(rows, main) {
        let Some(key) = main.key.apply(row, rows) else {
            log::trace!("main table `{}` row has no join key; skipping", main.name);
            continue;
        };

        let mut composite = Record::new();
        for field in &main.fields {
            write_field(&mut composite, row, field, false);
        }
        composites.insert(key, composite);
    }

    for table in set.secondaries() {
        for row in rows_of(rows, table) {
            let composite = table
                .key
                .apply(row, rows)
                .and_then(|key| composites.get_mut(&key));

            let Some(composite) = composite else {
                // row has no relation with the main table data
                log::trace!("dropping uncorrelated `{}` row", table.name);
                continue;
            };

            for field in &table.fields {
                write_field(composite, row, field, table.accumulate);
            }
        }
    }

    composites
}

/// Copies already-reconciled accumulate columns onto a composite record.
///
/// Write paths hold an accumulate table's result as one record of parallel
/// arrays rather than as rows; this surfaces those arrays under their
/// logical names.
pub(crate) fn attach_columns(composite: &mut Record, table: &TableMapping, columns: &Record) {
    for field in &table.fields {
        if let Some(values) = columns.get(field.physical_name()) {
            composite.insert(field.logical_name().to_string(), values.clone());
        }
    }
}

fn rows_of<'a>(rows: &'a TableRows, table: &TableMapping) -> impl Iterator<Item = &'a Record> {
    rows.get(&table.name).into_iter().flatten()
}

fn write_field(composite: &mut Record, row: &Record, field: &FieldSpec, accumulate: bool) {
    let value = row.get(field.physical_name());

    if !accumulate {
        if let Some(value) = value {
            composite.insert(field.logical_name().to_string(), value.clone());
        }
        return;
    }

    // Missing values still take a slot so parallel arrays stay aligned.
    let value = value.cloned().unwrap_or(Value::Null);
    let slot = composite
        .entry(field.logical_name())
        .or_insert_with(|| Value::Array(vec![]));

    match slot {
        Value::Array(values) => values.push(value),
        scalar => *scalar = Value::Array(vec![scalar.take(), value]),
    }
}
