use application::service::AuthenticateService;
use application::transfer::{AuthenticateDto, SessionDto};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use error_stack::Report;
use kernel::KernelError;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

/// Session of the caller, resolved from an `Authorization: Bearer` header.
#[derive(Debug)]
pub struct Authenticated(SessionDto);

impl Authenticated {
    pub fn into_session(self) -> SessionDto {
        self.0
    }
}

#[axum::async_trait]
impl FromRequestParts<AppModule> for Authenticated {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppModule,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|rejection| {
                Report::new(KernelError::Unauthorized)
                    .attach_printable(format!("bearer token rejected: {rejection}"))
            })?;
        let session = state
            .handler()
            .authenticate(AuthenticateDto {
                token: bearer.token().to_string(),
            })
            .await?;
        tracing::trace!("request by {}", session.email);
        Ok(Self(session))
    }
}
