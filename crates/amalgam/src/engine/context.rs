use super::disaggregate::disaggregate;

use amalgam_core::{schema::MappingSet, Record};

use indexmap::IndexMap;

/// Working state of one write request.
///
/// Holds, for every table of the mapping set, the slice of the new payload
/// the table owns and, when the request carries one, the slice of the
/// previous record. The context is created by the handler serving the
/// request and dropped with it; mappings themselves are never written to.
#[derive(Debug, Default)]
pub(crate) struct Context {
    tables: IndexMap<String, TableState>,
}

#[derive(Debug, Default)]
pub(crate) struct TableState {
    pub(crate) data: Record,
    pub(crate) previous_data: Option<Record>,
}

impl Context {
    pub(crate) fn new(set: &MappingSet, data: &Record) -> Context {
        let tables = disaggregate(set, data)
            .into_iter()
            .map(|(name, data)| {
                let state = TableState {
                    data,
                    previous_data: None,
                };
                (name, state)
            })
            .collect();

        Context { tables }
    }

    /// Splits the previous record the same way the new payload was split.
    pub(crate) fn with_previous_data(mut self, set: &MappingSet, previous: &Record) -> Context {
        for (name, previous_data) in disaggregate(set, previous) {
            if let Some(state) = self.tables.get_mut(&name) {
                state.previous_data = Some(previous_data);
            }
        }
        self
    }

    /// Returns the state of `table`.
    ///
    /// # Panics
    ///
    /// Panics if `table` is not part of the mapping set the context was
    /// created from.
    pub(crate) fn table(&self, table: &str) -> &TableState {
        self.tables
            .get(table)
            .unwrap_or_else(|| panic!("table `{table}` is not part of this request"))
    }
}
