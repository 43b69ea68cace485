use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use kernel::interface::session::SessionStore;
use kernel::prelude::entity::{Account, SessionToken};
use kernel::KernelError;

#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Account>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn issue(&self, account: &Account) -> error_stack::Result<SessionToken, KernelError> {
        let token = SessionToken::new(Uuid::new_v4().simple().to_string());
        self.sessions
            .write()
            .await
            .insert(token.clone(), account.clone());
        Ok(token)
    }

    async fn resolve(
        &self,
        token: &SessionToken,
    ) -> error_stack::Result<Option<Account>, KernelError> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn revoke(&self, token: &SessionToken) -> error_stack::Result<(), KernelError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}
