use application::transfer::PaymentDto;
use axum::http::StatusCode;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Exhaust;
use crate::response::CreatedResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    id: Uuid,
    user_id: String,
    area_id: String,
    amount: i64,
    months: Vec<String>,
    year: i32,
    #[serde(with = "time::serde::rfc3339")]
    paid_at: OffsetDateTime,
    status: String,
    payment_month: Option<i32>,
    payment_year: Option<i32>,
}

impl From<PaymentDto> for PaymentResponse {
    fn from(value: PaymentDto) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            area_id: value.area_id,
            amount: value.amount,
            months: value.months,
            year: value.year,
            paid_at: value.paid_at,
            status: value.status,
            payment_month: value.payment_month,
            payment_year: value.payment_year,
        }
    }
}

pub struct PaymentPresenter;

impl Exhaust<()> for PaymentPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<Uuid> for PaymentPresenter {
    type To = CreatedResponse<Uuid>;
    fn emit(&self, input: Uuid) -> Self::To {
        CreatedResponse::new(input)
    }
}

impl Exhaust<Vec<PaymentDto>> for PaymentPresenter {
    type To = axum::Json<Vec<PaymentResponse>>;
    fn emit(&self, input: Vec<PaymentDto>) -> Self::To {
        axum::Json(input.into_iter().map(PaymentResponse::from).collect())
    }
}
