use application::transfer::{SignInDto, SignOutDto};
use serde::Deserialize;

use crate::controller::Intake;
use crate::session::Authenticated;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

pub struct SessionTransformer;

impl Intake<LoginRequest> for SessionTransformer {
    type To = SignInDto;
    fn emit(&self, input: LoginRequest) -> Self::To {
        SignInDto {
            email: input.email,
            password: input.password,
        }
    }
}

impl Intake<Authenticated> for SessionTransformer {
    type To = SignOutDto;
    fn emit(&self, input: Authenticated) -> Self::To {
        SignOutDto {
            token: input.into_session().token,
        }
    }
}
