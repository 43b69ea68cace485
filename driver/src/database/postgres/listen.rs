use sqlx::postgres::PgListener;

use kernel::interface::subscribe::{PaymentChangeSubscriber, PaymentChanges};
use kernel::KernelError;

use crate::database::postgres::PostgresDatabase;
use crate::error::ConvertError;

/// Channel the `payments_changed` trigger notifies on every write.
const PAYMENTS_CHANGED: &str = "payments_changed";

pub struct PostgresPaymentChanges(PgListener);

#[async_trait::async_trait]
impl PaymentChanges for PostgresPaymentChanges {
    async fn next_change(&mut self) -> error_stack::Result<(), KernelError> {
        let notification = self.0.recv().await.convert_error()?;
        tracing::trace!("notified on {}", notification.channel());
        Ok(())
    }
}

#[async_trait::async_trait]
impl PaymentChangeSubscriber for PostgresDatabase {
    type Changes = PostgresPaymentChanges;
    #[tracing::instrument(skip(self))]
    async fn subscribe(&self) -> error_stack::Result<Self::Changes, KernelError> {
        let mut listener = PgListener::connect_with(self.pool()).await.convert_error()?;
        listener.listen(PAYMENTS_CHANGED).await.convert_error()?;
        Ok(PostgresPaymentChanges(listener))
    }
}
