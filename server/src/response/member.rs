use application::transfer::{MemberDto, NextReferenceDto};
use axum::http::StatusCode;
use serde::Serialize;
use time::OffsetDateTime;

use crate::controller::Exhaust;
use crate::response::CreatedResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    id: String,
    ref_no: String,
    name: String,
    identity_number: String,
    address: String,
    contact_no: String,
    subscription: String,
    area_code: String,
    area_id: String,
    last_payment: Option<i64>,
    #[serde(with = "time::serde::rfc3339::option")]
    last_payment_date: Option<OffsetDateTime>,
}

impl From<MemberDto> for MemberResponse {
    fn from(value: MemberDto) -> Self {
        Self {
            id: value.id,
            ref_no: value.ref_no,
            name: value.name,
            identity_number: value.identity_number,
            address: value.address,
            contact_no: value.contact_no,
            subscription: value.subscription,
            area_code: value.area_code,
            area_id: value.area_id,
            last_payment: value.last_payment,
            last_payment_date: value.last_payment_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextReferenceResponse {
    ref_no: String,
    id: String,
}

pub struct MemberPresenter;

impl Exhaust<()> for MemberPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<String> for MemberPresenter {
    type To = CreatedResponse<String>;
    fn emit(&self, input: String) -> Self::To {
        CreatedResponse::new(input)
    }
}

impl Exhaust<MemberDto> for MemberPresenter {
    type To = axum::Json<MemberResponse>;
    fn emit(&self, input: MemberDto) -> Self::To {
        axum::Json(MemberResponse::from(input))
    }
}

impl Exhaust<Vec<MemberDto>> for MemberPresenter {
    type To = axum::Json<Vec<MemberResponse>>;
    fn emit(&self, input: Vec<MemberDto>) -> Self::To {
        axum::Json(input.into_iter().map(MemberResponse::from).collect())
    }
}

impl Exhaust<NextReferenceDto> for MemberPresenter {
    type To = axum::Json<NextReferenceResponse>;
    fn emit(&self, input: NextReferenceDto) -> Self::To {
        axum::Json(NextReferenceResponse {
            ref_no: input.ref_no,
            id: input.id,
        })
    }
}
