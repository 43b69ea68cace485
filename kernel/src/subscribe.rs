use crate::KernelError;

/// A live feed of "the payment collection changed" signals.
#[async_trait::async_trait]
pub trait PaymentChanges: 'static + Send {
    /// Resolves once the next change has been observed. An error means the
    /// feed is gone and the subscriber should stop.
    async fn next_change(&mut self) -> error_stack::Result<(), KernelError>;
}

#[async_trait::async_trait]
pub trait PaymentChangeSubscriber: 'static + Sync + Send {
    type Changes: PaymentChanges;
    async fn subscribe(&self) -> error_stack::Result<Self::Changes, KernelError>;
}

pub trait DependOnPaymentChangeSubscriber: 'static + Sync + Send {
    type PaymentChangeSubscriber: PaymentChangeSubscriber;
    fn payment_change_subscriber(&self) -> &Self::PaymentChangeSubscriber;
}
