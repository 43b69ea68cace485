use time::OffsetDateTime;

use kernel::interface::query::PaymentQuery;
use kernel::interface::update::PaymentModifier;
use kernel::prelude::entity::{AreaId, MemberId, MonthLabel, Payment, PaymentId, PaymentYear};
use kernel::KernelError;

use crate::database::InMemoryTransaction;

pub struct InMemoryPaymentRepository;

fn newest_first(mut payments: Vec<Payment>) -> Vec<Payment> {
    payments.sort_by(|a, b| b.paid_at().as_ref().cmp(a.paid_at().as_ref()));
    payments
}

fn select<F>(con: &InMemoryTransaction, predicate: F) -> Vec<Payment>
where
    F: Fn(&Payment) -> bool,
{
    let selected = con
        .store()
        .payments
        .values()
        .filter(|payment| predicate(payment))
        .cloned()
        .collect();
    newest_first(selected)
}

#[async_trait::async_trait]
impl PaymentQuery for InMemoryPaymentRepository {
    type Transaction = InMemoryTransaction;
    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        Ok(select(con, |_| true))
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        Ok(con.store().payments.get(id).cloned())
    }

    async fn find_by_user_id(
        &self,
        con: &mut InMemoryTransaction,
        user_id: &MemberId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        Ok(select(con, |payment| payment.user_id() == user_id))
    }

    async fn find_by_area_id(
        &self,
        con: &mut InMemoryTransaction,
        area_id: &AreaId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        Ok(select(con, |payment| payment.area_id() == area_id))
    }

    async fn find_paid_between(
        &self,
        con: &mut InMemoryTransaction,
        start: &OffsetDateTime,
        end: &OffsetDateTime,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        Ok(select(con, |payment| {
            let paid_at = payment.paid_at().as_ref();
            start <= paid_at && paid_at <= end
        }))
    }

    async fn find_covering(
        &self,
        con: &mut InMemoryTransaction,
        month: &MonthLabel,
        year: &PaymentYear,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        Ok(select(con, |payment| {
            payment.year() == year && payment.months().contains(*month)
        }))
    }
}

#[async_trait::async_trait]
impl PaymentModifier for InMemoryPaymentRepository {
    type Transaction = InMemoryTransaction;
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        con.payments_mut()
            .insert(*payment.id(), payment.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.payments_mut().get_mut(payment.id()) {
            *stored = payment.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        payment_id: &PaymentId,
    ) -> error_stack::Result<(), KernelError> {
        con.payments_mut().remove(payment_id);
        Ok(())
    }
}
