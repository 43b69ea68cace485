use deadpool_redis::redis;
use deadpool_redis::redis::AsyncCommands;
use uuid::Uuid;

use kernel::interface::session::SessionStore;
use kernel::prelude::entity::{Account, SessionToken};
use kernel::KernelError;

use crate::database::RedisDatabase;
use crate::env_or;
use crate::error::ConvertError;

const SESSION_TTL_SECONDS: &str = "SESSION_TTL_SECONDS";
const DEFAULT_TTL_SECONDS: u64 = 60 * 60 * 12;

fn session_key(token: &SessionToken) -> String {
    let token: &String = token.as_ref();
    format!("session:{token}")
}

#[derive(Clone)]
pub struct RedisSessionStore {
    db: RedisDatabase,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(db: RedisDatabase) -> error_stack::Result<Self, KernelError> {
        let ttl_seconds = env_or(SESSION_TTL_SECONDS, DEFAULT_TTL_SECONDS)?;
        Ok(Self { db, ttl_seconds })
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn issue(&self, account: &Account) -> error_stack::Result<SessionToken, KernelError> {
        let token = SessionToken::new(Uuid::new_v4().simple().to_string());
        let raw = serde_json::to_string(account).convert_error()?;
        let mut con = self.db.connection().await?;
        redis::cmd("SET")
            .arg(session_key(&token))
            .arg(raw)
            .arg("EX")
            .arg(self.ttl_seconds)
            .query_async::<_, ()>(&mut con)
            .await
            .convert_error()?;
        Ok(token)
    }

    async fn resolve(
        &self,
        token: &SessionToken,
    ) -> error_stack::Result<Option<Account>, KernelError> {
        let mut con = self.db.connection().await?;
        let raw: Option<String> = con.get(session_key(token)).await.convert_error()?;
        raw.map(|raw| serde_json::from_str(&raw))
            .transpose()
            .convert_error()
    }

    async fn revoke(&self, token: &SessionToken) -> error_stack::Result<(), KernelError> {
        let mut con = self.db.connection().await?;
        con.del::<_, ()>(session_key(token)).await.convert_error()
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::session::SessionStore;
    use kernel::prelude::entity::{Account, AccountEmail};
    use kernel::KernelError;

    use crate::database::{RedisDatabase, RedisSessionStore};

    #[test_with::env(REDIS_TEST)]
    #[tokio::test]
    async fn issue_resolve_revoke() -> error_stack::Result<(), KernelError> {
        let store = RedisSessionStore::new(RedisDatabase::new()?)?;
        let account = Account::new(AccountEmail::new("admin@example.com"));

        let token = store.issue(&account).await?;
        assert_eq!(store.resolve(&token).await?, Some(account));

        store.revoke(&token).await?;
        assert!(store.resolve(&token).await?.is_none());
        Ok(())
    }
}
