use super::*;

use amalgam_core::{driver::operation::One, record};

impl Engine {
    /// Reads one composite record.
    ///
    /// The record is stamped with the main row's own identifier, so a
    /// request for `"1"` answers with the stored `1`. When the main table has
    /// no such row the response carries `null`, as a single table would.
    pub(super) async fn handle_one(&self, set: &MappingSet, one: One) -> Result<Response> {
        let requested = one.id.clone();
        let (rows, _) = self.read(set, one.into(), false).await?;

        let id = rows
            .get(&set.main().name)
            .and_then(|rows| rows.first())
            .map(|row| record::field(row, ID))
            .filter(|id| !id.is_null())
            .cloned()
            .unwrap_or(requested);

        match aggregate(set, &rows).into_values().next() {
            Some(mut composite) => {
                composite.insert(ID.to_string(), id);
                Ok(Response::record(composite))
            }
            None => Ok(Response::new(Value::Null)),
        }
    }
}
