use crate::entity::{Account, Credential, SessionToken};
use crate::KernelError;

/// Checks sign-in credentials. Stands in for an identity provider.
pub trait AccountVerifier: 'static + Sync + Send {
    fn verify(&self, credential: &Credential) -> Option<Account>;
}

pub trait DependOnAccountVerifier: 'static + Sync + Send {
    type AccountVerifier: AccountVerifier;
    fn account_verifier(&self) -> &Self::AccountVerifier;
}

/// Issued tokens and the account each one belongs to.
#[async_trait::async_trait]
pub trait SessionStore: 'static + Sync + Send {
    async fn issue(&self, account: &Account) -> error_stack::Result<SessionToken, KernelError>;
    async fn resolve(
        &self,
        token: &SessionToken,
    ) -> error_stack::Result<Option<Account>, KernelError>;
    async fn revoke(&self, token: &SessionToken) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnSessionStore: 'static + Sync + Send {
    type SessionStore: SessionStore;
    fn session_store(&self) -> &Self::SessionStore;
}
