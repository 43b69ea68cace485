use kernel::interface::query::AreaQuery;
use kernel::prelude::entity::{Area, AreaId};
use kernel::KernelError;

use crate::database::InMemoryTransaction;

pub struct InMemoryAreaRepository;

#[async_trait::async_trait]
impl AreaQuery for InMemoryAreaRepository {
    type Transaction = InMemoryTransaction;
    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Area>, KernelError> {
        Ok(con.store().areas.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &AreaId,
    ) -> error_stack::Result<Option<Area>, KernelError> {
        Ok(con.store().areas.get(id).cloned())
    }
}
