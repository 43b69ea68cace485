use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Payment, PaymentId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PaymentModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        payment_id: &PaymentId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnPaymentModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type PaymentModifier: PaymentModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn payment_modifier(&self) -> &Self::PaymentModifier;
}
