use super::{
    context::TableState,
    diff::{diff, reconcile},
    Engine,
};

use amalgam_core::{
    driver::{
        operation::{Create, Delete, List, Pagination, Sort},
        Operation, Response,
    },
    record::ID,
    schema::{MappingSet, TableMapping, TableRows},
    Error, Record, Result,
};

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

impl Engine {
    /// Runs one operation against one table.
    pub(super) async fn perform(&self, table: &str, op: Operation) -> Result<Response> {
        log::debug!("{} `{table}`", op.name());
        self.driver().exec(table, op).await
    }

    /// Reads every row of a table matching `filter`.
    ///
    /// Stores only hand out pages, so this probes with a one-row page to
    /// learn the total, then reads that many rows in one page.
    pub(super) async fn fetch_all(&self, table: &str, filter: Record) -> Result<Vec<Record>> {
        let probe = List::new(Pagination::new(1, 1), Sort::desc(ID)).filter(filter);
        let total = self.perform(table, probe.clone().into()).await?.total()?;

        if total == 0 {
            return Ok(vec![]);
        }

        let all = List {
            pagination: Pagination::new(1, total),
            ..probe
        };
        self.perform(table, all.into()).await?.into_rows()
    }

    /// Reads the rows a composite read needs from every table of the set.
    ///
    /// The main table is read with `main_op` (after the table's `params`
    /// hook); every other table is read in full. All reads run concurrently.
    /// With `count`, the main table's filter is also used to count every
    /// matching main row, for pagination.
    pub(super) async fn read(
        &self,
        set: &MappingSet,
        main_op: Operation,
        count: bool,
    ) -> Result<(TableRows, Option<u64>)> {
        let main = set.main();
        let main_op = main.read_params(main_op);

        let total = match (&main_op, count) {
            (Operation::List(list), true) => {
                let filter = list.filter.clone();
                let total: BoxFuture<'_, Result<u64>> = async move {
                    let rows = self.fetch_all(&main.name, filter).await?;
                    Ok(rows.len() as u64)
                }
                .boxed();
                Some(total)
            }
            _ => None,
        };

        let mut reads: Vec<BoxFuture<'_, Result<(String, Vec<Record>)>>> = vec![];
        for table in set.tables() {
            let name = table.name.clone();
            if table.main {
                let op = main_op.clone();
                reads.push(
                    async move {
                        let rows = self.perform(&name, op).await?.into_rows()?;
                        Ok::<_, Error>((name, rows))
                    }
                    .boxed(),
                );
            } else {
                reads.push(
                    async move {
                        let rows = self.fetch_all(&name, Record::new()).await?;
                        Ok::<_, Error>((name, rows))
                    }
                    .boxed(),
                );
            }
        }

        let (rows, total) = match total {
            Some(total) => {
                let (rows, total) = future::join(future::join_all(reads), total).await;
                (settle(rows)?, Some(total?))
            }
            None => (settle(future::join_all(reads).await)?, None),
        };

        Ok((rows.into_iter().collect(), total))
    }

    /// Reconciles an accumulate table with the new payload.
    ///
    /// Deletes the rows whose values disappeared and creates rows for the
    /// values that are new, each stamped with the main identifier. Returns
    /// the table's columns with `id` replaced by the reconciled identifiers.
    pub(super) async fn write_accumulate(
        &self,
        table: &TableMapping,
        state: &TableState,
        main_id: &Value,
    ) -> Result<Record> {
        let diff = diff(state.previous_data.as_ref(), &state.data);
        log::trace!(
            "`{}`: deleting {:?}, creating {} rows",
            table.name,
            diff.delete,
            diff.create.len()
        );

        let foreign_key = match &table.foreign_key {
            Some(foreign_key) => foreign_key.apply(main_id),
            None => Record::new(),
        };

        let deletes = diff.delete.iter().map(|id| {
            self.perform(&table.name, Delete::new(id.clone()).into())
        });

        let creates = diff.create.into_iter().map(|mut row| {
            row.extend(foreign_key.clone());
            self.perform(&table.name, Create::new(row).into())
        });

        let (deleted, created) =
            future::join(future::join_all(deletes), future::join_all(creates)).await;
        settle(deleted)?;

        let created = settle(created)?
            .iter()
            .map(Response::id)
            .collect::<Result<Vec<_>>>()?;

        let mut columns = state.data.clone();
        columns.insert(
            ID.to_string(),
            Value::Array(reconcile(&state.data, &diff.delete, created)),
        );
        Ok(columns)
    }
}

/// Fan-in of a concurrent batch: every operation has settled by the time
/// this runs. Succeeds with all results in issue order, or fails with the
/// first error in issue order.
pub(super) fn settle<T>(results: Vec<Result<T>>) -> Result<Vec<T>> {
    results.into_iter().collect()
}
