use time::OffsetDateTime;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{AreaId, MemberId, MonthLabel, Payment, PaymentId, PaymentYear};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PaymentQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Payment>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError>;
    async fn find_by_user_id(
        &self,
        con: &mut Self::Transaction,
        user_id: &MemberId,
    ) -> error_stack::Result<Vec<Payment>, KernelError>;
    async fn find_by_area_id(
        &self,
        con: &mut Self::Transaction,
        area_id: &AreaId,
    ) -> error_stack::Result<Vec<Payment>, KernelError>;
    /// Payments with `start <= paid_at <= end`.
    async fn find_paid_between(
        &self,
        con: &mut Self::Transaction,
        start: &OffsetDateTime,
        end: &OffsetDateTime,
    ) -> error_stack::Result<Vec<Payment>, KernelError>;
    /// Payments whose covered months contain `month` for `year`.
    async fn find_covering(
        &self,
        con: &mut Self::Transaction,
        month: &MonthLabel,
        year: &PaymentYear,
    ) -> error_stack::Result<Vec<Payment>, KernelError>;
}

pub trait DependOnPaymentQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type PaymentQuery: PaymentQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn payment_query(&self) -> &Self::PaymentQuery;
}
