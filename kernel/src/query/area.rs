use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Area, AreaId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait AreaQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Area>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &AreaId,
    ) -> error_stack::Result<Option<Area>, KernelError>;
}

pub trait DependOnAreaQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type AreaQuery: AreaQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn area_query(&self) -> &Self::AreaQuery;
}
