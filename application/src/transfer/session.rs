use kernel::prelude::entity::Session;

pub struct SignInDto {
    pub email: String,
    pub password: String,
}

pub struct SignOutDto {
    pub token: String,
}

pub struct AuthenticateDto {
    pub token: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SessionDto {
    pub token: String,
    pub email: String,
}

impl From<Session> for SessionDto {
    fn from(value: Session) -> Self {
        Self {
            token: value.token().as_ref().clone(),
            email: value.account().email().as_ref().clone(),
        }
    }
}
