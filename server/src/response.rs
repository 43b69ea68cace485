mod area;
mod collection;
mod member;
mod payment;
mod session;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub use self::{area::*, collection::*, member::*, payment::*, session::*};

#[derive(Debug, Serialize)]
pub struct CreatedResponse<T> {
    id: T,
}

impl<T> CreatedResponse<T> {
    pub fn new(id: T) -> Self {
        Self { id }
    }
}

impl<T: Serialize> IntoResponse for CreatedResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}
