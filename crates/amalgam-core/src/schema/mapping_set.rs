use super::TableMapping;

use indexmap::IndexMap;
use serde::Deserialize;

/// The kind of request a mapping set serves.
///
/// Reading one record and updating it share the `Edit` set, as do deleting
/// one record and deleting several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MappingKind {
    List,
    Edit,
    Create,
    Delete,
}

impl core::fmt::Display for MappingKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(match self {
            MappingKind::List => "LIST",
            MappingKind::Edit => "EDIT",
            MappingKind::Create => "CREATE",
            MappingKind::Delete => "DELETE",
        })
    }
}

/// The tables taking part in one kind of request against one resource.
#[derive(Debug, Clone, Default)]
pub struct MappingSet {
    tables: IndexMap<String, TableMapping>,
}

impl MappingSet {
    pub fn new() -> MappingSet {
        MappingSet::default()
    }

    /// Appends a table. Declaration order is significant: it is the order in
    /// which field ownership is resolved and in which tables are queried.
    pub fn table(mut self, table: TableMapping) -> MappingSet {
        self.tables.insert(table.name.clone(), table);
        self
    }

    pub fn tables(&self) -> impl ExactSizeIterator<Item = &TableMapping> {
        self.tables.values()
    }

    pub fn get(&self, name: &str) -> Option<&TableMapping> {
        self.tables.get(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the main table.
    ///
    /// # Panics
    ///
    /// Panics if the set has no main table. Sets held by a
    /// [`Registry`](super::Registry) are verified to have exactly one.
    pub fn main(&self) -> &TableMapping {
        self.tables
            .values()
            .find(|table| table.main)
            .expect("mapping set has no main table")
    }

    /// Tables other than the main table, in declaration order.
    pub fn secondaries(&self) -> impl Iterator<Item = &TableMapping> {
        self.tables.values().filter(|table| !table.main)
    }

    pub fn has_accumulate(&self) -> bool {
        self.tables.values().any(|table| table.accumulate)
    }

    /// Finds the table owning the logical field `name`, along with the
    /// physical column the field maps to. The first declaring table wins.
    pub fn owner(&self, name: &str) -> Option<(&TableMapping, &str)> {
        self.tables
            .values()
            .find_map(|table| table.physical_name(name).map(|physical| (table, physical)))
    }
}

impl FromIterator<TableMapping> for MappingSet {
    fn from_iter<I: IntoIterator<Item = TableMapping>>(iter: I) -> Self {
        iter.into_iter().fold(MappingSet::new(), MappingSet::table)
    }
}
