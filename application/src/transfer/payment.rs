use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructPayment, Payment};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PaymentDto {
    pub id: Uuid,
    pub user_id: String,
    pub area_id: String,
    pub amount: i64,
    pub months: Vec<String>,
    pub year: i32,
    pub paid_at: OffsetDateTime,
    pub status: String,
    pub payment_month: Option<i32>,
    pub payment_year: Option<i32>,
}

impl From<Payment> for PaymentDto {
    fn from(value: Payment) -> Self {
        let DestructPayment {
            id,
            user_id,
            area_id,
            amount,
            months,
            year,
            paid_at,
            status,
            payment_month,
            payment_year,
        } = value.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            area_id: area_id.into(),
            amount: amount.into(),
            months: months.codes(),
            year: year.into(),
            paid_at: paid_at.into(),
            status: status.into(),
            payment_month: payment_month.map(Into::into),
            payment_year: payment_year.map(Into::into),
        }
    }
}

pub struct GetPaymentsOfMemberDto {
    pub user_id: String,
    pub query: Option<String>,
}

pub struct GetPaymentsOfAreaDto {
    pub area_id: String,
    pub query: Option<String>,
}

/// Raw payment form. Every field is checked before anything is stored.
pub struct CreatePaymentDto {
    pub user_id: String,
    pub amount: Option<i64>,
    pub months: Vec<String>,
    pub year: Option<i32>,
    pub paid_at: Option<OffsetDateTime>,
    pub status: Option<String>,
}

pub struct UpdatePaymentDto {
    pub id: Uuid,
    pub amount: Option<i64>,
    pub months: Option<Vec<String>>,
    pub year: Option<i32>,
    pub paid_at: Option<OffsetDateTime>,
    pub status: Option<String>,
}

pub struct DeletePaymentDto {
    pub id: Uuid,
}
