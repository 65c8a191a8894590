use super::*;

use amalgam_core::driver::operation::List;

impl Engine {
    pub(super) async fn handle_list(&self, set: &MappingSet, list: List) -> Result<Response> {
        let (rows, total) = self.read(set, list.into(), true).await?;
        let data = aggregate(set, &rows).into_values().collect();

        Ok(Response::list(data, total.unwrap_or_default()))
    }
}
