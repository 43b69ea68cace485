use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use vodca::{AsRefln, Fromln, References};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct AccountEmail(String);

impl AccountEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn matches(&self, other: &str) -> bool {
        self.0.trim().eq_ignore_ascii_case(other.trim())
    }
}

/// An operator allowed to use the application.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct Account {
    email: AccountEmail,
}

impl Account {
    pub fn new(email: AccountEmail) -> Self {
        Self { email }
    }
}

/// Opaque bearer token handed out at sign-in.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct Credential {
    email: String,
    password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// The signed-in identity for one request. Handlers receive it explicitly
/// instead of reading process-wide state.
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct Session {
    token: SessionToken,
    account: Account,
}

impl Session {
    pub fn new(token: SessionToken, account: Account) -> Self {
        Self { token, account }
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let email: &String = self.account.email().as_ref();
        f.write_str(email)
    }
}
