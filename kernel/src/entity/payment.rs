mod amount;
mod id;
mod month;
mod paid_at;
mod status;
mod year;

pub use self::{amount::*, id::*, month::*, paid_at::*, status::*, year::*};
use crate::entity::{AreaId, MemberId};
use destructure::{Destructure, Mutation};
use serde::{Deserialize, Serialize};
use vodca::References;

/// A single payment, possibly covering several months at once.
///
/// `months`/`year` are what the member paid for; `payment_month` and
/// `payment_year` record when the money came in and feed the yearly history.
#[derive(
    Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, Mutation, References,
)]
pub struct Payment {
    id: PaymentId,
    user_id: MemberId,
    area_id: AreaId,
    amount: PaymentAmount,
    months: CoveredMonths,
    year: PaymentYear,
    paid_at: PaidAt,
    status: PaymentStatus,
    payment_month: Option<PaymentMonth>,
    payment_year: Option<PaymentYear>,
}

impl Payment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PaymentId,
        user_id: MemberId,
        area_id: AreaId,
        amount: PaymentAmount,
        months: CoveredMonths,
        year: PaymentYear,
        paid_at: PaidAt,
        status: PaymentStatus,
        payment_month: Option<PaymentMonth>,
        payment_year: Option<PaymentYear>,
    ) -> Self {
        Self {
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
        }
    }
}
