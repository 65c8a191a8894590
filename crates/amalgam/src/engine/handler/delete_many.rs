use super::*;

use crate::engine::exec::settle;

use amalgam_core::driver::operation::{Delete, DeleteMany, One};

use futures::future;

impl Engine {
    /// Deletes several composite records.
    ///
    /// Each identifier is read through the same mapping set and then deleted
    /// with the record it read, independently of the others. Answers with the
    /// deleted identifiers, in request order.
    pub(super) async fn handle_delete_many(
        &self,
        set: &MappingSet,
        delete_many: DeleteMany,
    ) -> Result<Response> {
        let deletes = delete_many.ids.into_iter().map(|id| async move {
            let previous = self
                .handle_one(set, One::new(id.clone()))
                .await?
                .into_record()?
                .unwrap_or_default();

            let response = self
                .handle_delete(set, Delete::new(id.clone()).previous_data(previous))
                .await?;
            Ok::<_, Error>(response.id().unwrap_or(id))
        });

        let ids = settle(future::join_all(deletes).await)?;
        Ok(Response::new(Value::Array(ids)))
    }
}
