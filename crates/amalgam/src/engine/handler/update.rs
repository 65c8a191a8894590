use super::*;

use crate::engine::{context::Context, exec::settle};

use amalgam_core::{driver::operation::Update, record};

use futures::future::{self, BoxFuture, FutureExt};

impl Engine {
    /// Updates a composite record.
    ///
    /// Every identifier is already known, so all tables are written
    /// concurrently: the main table by the requested identifier, other plain
    /// tables by the `id` column of their own slice of the payload, and
    /// accumulate tables by diffing against the previous record.
    pub(super) async fn handle_update(&self, set: &MappingSet, update: Update) -> Result<Response> {
        let mut cx = Context::new(set, &update.data);
        if set.has_accumulate() {
            if let Some(previous_data) = &update.previous_data {
                cx = cx.with_previous_data(set, previous_data);
            }
        }

        self.check_update(set, &cx, &update)?;

        let main = set.main();
        let id = update.id;
        let main_data = cx.table(&main.name).data.clone();

        let main_write = async {
            let response = self
                .perform(&main.name, Update::new(id.clone(), main_data.clone()).into())
                .await?;
            Ok::<_, Error>(returned_row(response, main_data))
        };

        let mut writes: Vec<BoxFuture<'_, Result<Written>>> = vec![];
        for table in set.secondaries() {
            let state = cx.table(&table.name);
            if state.data.is_empty() {
                continue;
            }

            if table.accumulate {
                let id = &id;
                writes.push(
                    async move {
                        let columns = self.write_accumulate(table, state, id).await?;
                        Ok(Written::Columns(table.name.clone(), columns))
                    }
                    .boxed(),
                );
            } else {
                let row_id = record::field(&state.data, ID).clone();
                let row = state.data.clone();
                writes.push(
                    async move {
                        let response = self
                            .perform(&table.name, Update::new(row_id, row.clone()).into())
                            .await?;
                        Ok(Written::Rows(table.name.clone(), returned_row(response, row)))
                    }
                    .boxed(),
                );
            }
        }

        let (main_rows, written) = future::join(main_write, future::join_all(writes)).await;
        let main_rows = main_rows?;
        let written = settle(written)?;

        Ok(Response::record(written_record(set, main_rows, written, id)))
    }

    /// Rejects updates that cannot be carried out before any table is
    /// written.
    fn check_update(&self, set: &MappingSet, cx: &Context, update: &Update) -> Result<()> {
        for table in set.secondaries() {
            let state = cx.table(&table.name);
            if state.data.is_empty() {
                continue;
            }

            if table.accumulate {
                if update.previous_data.is_none() {
                    return Err(Error::invalid_request(format!(
                        "updating `{}` requires the previous record",
                        table.name
                    )));
                }
            } else if record::field(&state.data, ID).is_null() {
                return Err(Error::invalid_request(format!(
                    "updating `{}` requires its row `id` in the payload",
                    table.name
                )));
            }
        }

        Ok(())
    }
}
