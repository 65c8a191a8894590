use amalgam_core::{schema::MappingSet, Record};

use indexmap::IndexMap;

/// Splits a logical payload into per-table partial rows.
///
/// Each logical field goes to the table that owns it, under that table's
/// physical column name. Fields no table declares are dropped. Every table of
/// the set gets an entry, empty when the payload touches none of its fields.
pub(crate) fn disaggregate(set: &MappingSet, payload: &Record) -> IndexMap<String, Record> {
    let mut partition: IndexMap<String, Record> = set
        .tables()
        .map(|table| (table.name.clone(), Record::new()))
        .collect();

    for (name, value) in payload {
        let Some((table, physical)) = set.owner(name) else {
            log::trace!("field `{name}` is not mapped to any table; dropping");
            continue;
        };

        if let Some(data) = partition.get_mut(&table.name) {
            data.insert(physical.to_string(), value.clone());
        }
    }

    partition
}
