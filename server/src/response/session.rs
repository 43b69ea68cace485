use application::transfer::SessionDto;
use axum::http::StatusCode;
use serde::Serialize;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    token: String,
    email: String,
}

pub struct SessionPresenter;

impl Exhaust<SessionDto> for SessionPresenter {
    type To = axum::Json<SessionResponse>;
    fn emit(&self, input: SessionDto) -> Self::To {
        axum::Json(SessionResponse {
            token: input.token,
            email: input.email,
        })
    }
}

impl Exhaust<()> for SessionPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
