use super::*;

use crate::engine::exec::settle;

use amalgam_core::{driver::operation::Delete, record};

use futures::future;

impl Engine {
    /// Deletes a composite record.
    ///
    /// Dependent rows go first, found through each table's `id` hook applied
    /// to the previous record; the main row is deleted once all of them are
    /// gone. The main table's response is returned as is.
    pub(super) async fn handle_delete(&self, set: &MappingSet, delete: Delete) -> Result<Response> {
        let main = set.main();
        let mut dependents = vec![];

        for table in set.secondaries() {
            let Some(previous) = &delete.previous_data else {
                return Err(Error::invalid_request(format!(
                    "deleting from `{}` requires the previous record",
                    table.name
                )));
            };

            let Some(id) = &table.id else {
                continue;
            };

            let ids = id.apply(previous);
            if ids.is_null() {
                log::trace!("no `{}` rows to delete", table.name);
            }

            for id in record::column(&ids) {
                dependents.push((table.name.as_str(), id.clone()));
            }
        }

        let deletes = dependents
            .into_iter()
            .map(|(table, id)| self.perform(table, Delete::new(id).into()));
        settle(future::join_all(deletes).await)?;

        self.perform(&main.name, Delete::new(delete.id).into()).await
    }
}
