use application::transfer::{
    CreatePaymentDto, DeletePaymentDto, GetPaymentsOfAreaDto, GetPaymentsOfMemberDto,
    UpdatePaymentDto,
};
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::SearchRequest;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    amount: Option<i64>,
    #[serde(default)]
    months: Vec<String>,
    year: Option<i32>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    paid_at: Option<OffsetDateTime>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    amount: Option<i64>,
    months: Option<Vec<String>>,
    year: Option<i32>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    paid_at: Option<OffsetDateTime>,
    status: Option<String>,
}

#[derive(Debug)]
pub struct DeletePaymentRequest {
    id: Uuid,
}

impl DeletePaymentRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct PaymentsOfAreaRequest {
    area_id: String,
    search: SearchRequest,
}

impl PaymentsOfAreaRequest {
    pub fn new(area_id: String, search: SearchRequest) -> Self {
        Self { area_id, search }
    }
}

#[derive(Debug)]
pub struct PaymentsOfMemberRequest {
    user_id: String,
    search: SearchRequest,
}

impl PaymentsOfMemberRequest {
    pub fn new(user_id: String, search: SearchRequest) -> Self {
        Self { user_id, search }
    }
}

pub struct PaymentTransformer;

impl Intake<(String, CreatePaymentRequest)> for PaymentTransformer {
    type To = CreatePaymentDto;
    fn emit(&self, input: (String, CreatePaymentRequest)) -> Self::To {
        let (user_id, input) = input;
        CreatePaymentDto {
            user_id,
            amount: input.amount,
            months: input.months,
            year: input.year,
            paid_at: input.paid_at,
            status: input.status,
        }
    }
}

impl Intake<(Uuid, UpdatePaymentRequest)> for PaymentTransformer {
    type To = UpdatePaymentDto;
    fn emit(&self, input: (Uuid, UpdatePaymentRequest)) -> Self::To {
        let (id, input) = input;
        UpdatePaymentDto {
            id,
            amount: input.amount,
            months: input.months,
            year: input.year,
            paid_at: input.paid_at,
            status: input.status,
        }
    }
}

impl Intake<DeletePaymentRequest> for PaymentTransformer {
    type To = DeletePaymentDto;
    fn emit(&self, input: DeletePaymentRequest) -> Self::To {
        DeletePaymentDto { id: input.id }
    }
}

impl Intake<PaymentsOfAreaRequest> for PaymentTransformer {
    type To = GetPaymentsOfAreaDto;
    fn emit(&self, input: PaymentsOfAreaRequest) -> Self::To {
        GetPaymentsOfAreaDto {
            area_id: input.area_id,
            query: input.search.into_query(),
        }
    }
}

impl Intake<PaymentsOfMemberRequest> for PaymentTransformer {
    type To = GetPaymentsOfMemberDto;
    fn emit(&self, input: PaymentsOfMemberRequest) -> Self::To {
        GetPaymentsOfMemberDto {
            user_id: input.user_id,
            query: input.search.into_query(),
        }
    }
}
