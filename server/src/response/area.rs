use application::transfer::AreaDto;
use serde::Serialize;
use time::OffsetDateTime;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaResponse {
    id: String,
    code: String,
    name: String,
    short_name: String,
    total_users: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<AreaDto> for AreaResponse {
    fn from(value: AreaDto) -> Self {
        Self {
            id: value.id,
            code: value.code,
            name: value.name,
            short_name: value.short_name,
            total_users: value.total_users,
            created_at: value.created_at,
        }
    }
}

pub struct AreaPresenter;

impl Exhaust<AreaDto> for AreaPresenter {
    type To = axum::Json<AreaResponse>;
    fn emit(&self, input: AreaDto) -> Self::To {
        axum::Json(AreaResponse::from(input))
    }
}

impl Exhaust<Vec<AreaDto>> for AreaPresenter {
    type To = axum::Json<Vec<AreaResponse>>;
    fn emit(&self, input: Vec<AreaDto>) -> Self::To {
        axum::Json(input.into_iter().map(AreaResponse::from).collect())
    }
}
