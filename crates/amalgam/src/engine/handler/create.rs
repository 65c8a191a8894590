use super::*;

use crate::engine::{context::Context, exec::settle};

use amalgam_core::driver::operation::Create;

use futures::future::{self, BoxFuture, FutureExt};

impl Engine {
    /// Creates a composite record.
    ///
    /// The main row is written first, since every dependent row needs its
    /// identifier. Dependent tables are then written concurrently: plain
    /// tables get one row carrying the foreign key, accumulate tables one row
    /// per array entry.
    pub(super) async fn handle_create(&self, set: &MappingSet, create: Create) -> Result<Response> {
        let data = set
            .tables()
            .filter_map(|table| table.init_data.as_ref())
            .fold(create.data, |data, init_data| init_data(data));

        let cx = Context::new(set, &data);
        let main = set.main();
        let main_data = cx.table(&main.name).data.clone();

        let response = self
            .perform(&main.name, Create::new(main_data.clone()).into())
            .await?;
        let main_id = response.id()?;
        let main_rows = returned_row(response, main_data);

        let mut writes: Vec<BoxFuture<'_, Result<Written>>> = vec![];
        for table in set.secondaries() {
            let state = cx.table(&table.name);
            let main_id = &main_id;

            if table.accumulate {
                writes.push(
                    async move {
                        let columns = self.write_accumulate(table, state, main_id).await?;
                        Ok(Written::Columns(table.name.clone(), columns))
                    }
                    .boxed(),
                );
            } else {
                let mut row = state.data.clone();
                if let Some(foreign_key) = &table.foreign_key {
                    row.extend(foreign_key.apply(main_id));
                }

                writes.push(
                    async move {
                        let response = self
                            .perform(&table.name, Create::new(row.clone()).into())
                            .await?;
                        Ok(Written::Rows(table.name.clone(), returned_row(response, row)))
                    }
                    .boxed(),
                );
            }
        }

        let written = settle(future::join_all(writes).await)?;
        Ok(Response::record(written_record(set, main_rows, written, main_id)))
    }
}
