use application::transfer::{DailyCollectionDto, MonthlyCollectionDto};
use serde::Serialize;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct DailyCollectionResponse {
    date: String,
    total: i64,
}

impl From<DailyCollectionDto> for DailyCollectionResponse {
    fn from(value: DailyCollectionDto) -> Self {
        Self {
            date: value.date.to_string(),
            total: value.total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MonthlyCollectionResponse {
    month: String,
    year: i32,
    total: i64,
}

impl From<MonthlyCollectionDto> for MonthlyCollectionResponse {
    fn from(value: MonthlyCollectionDto) -> Self {
        Self {
            month: value.month,
            year: value.year,
            total: value.total,
        }
    }
}

pub struct CollectionPresenter;

impl Exhaust<DailyCollectionDto> for CollectionPresenter {
    type To = axum::Json<DailyCollectionResponse>;
    fn emit(&self, input: DailyCollectionDto) -> Self::To {
        axum::Json(DailyCollectionResponse::from(input))
    }
}

impl Exhaust<MonthlyCollectionDto> for CollectionPresenter {
    type To = axum::Json<MonthlyCollectionResponse>;
    fn emit(&self, input: MonthlyCollectionDto) -> Self::To {
        axum::Json(MonthlyCollectionResponse::from(input))
    }
}

impl Exhaust<Vec<MonthlyCollectionDto>> for CollectionPresenter {
    type To = axum::Json<Vec<MonthlyCollectionResponse>>;
    fn emit(&self, input: Vec<MonthlyCollectionDto>) -> Self::To {
        axum::Json(input.into_iter().map(MonthlyCollectionResponse::from).collect())
    }
}
