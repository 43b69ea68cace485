use deadpool_redis::redis;
use deadpool_redis::redis::AsyncCommands;
use deadpool_redis::Connection;
use serde::{Deserialize, Serialize};

use kernel::interface::cache::{CacheGeneration, CacheKey, QueryCache};
use kernel::KernelError;

use crate::database::RedisDatabase;
use crate::env_or;
use crate::error::ConvertError;

const CACHE_TTL_SECONDS: &str = "CACHE_TTL_SECONDS";
const DEFAULT_TTL_SECONDS: u64 = 300;

fn cache_key(key: &CacheKey) -> String {
    format!("cache:{key}")
}

fn scope_pattern(scope: &str) -> String {
    format!("cache:{scope}:*")
}

fn key_generation(key: &CacheKey) -> String {
    format!("cache-gen:key:{key}")
}

fn scope_generation(scope: &str) -> String {
    format!("cache-gen:scope:{scope}")
}

async fn read_generation(
    con: &mut Connection,
    key: &CacheKey,
) -> error_stack::Result<CacheGeneration, KernelError> {
    let (scope, key): (Option<u64>, Option<u64>) = redis::cmd("MGET")
        .arg(scope_generation(key.scope()))
        .arg(key_generation(key))
        .query_async(con)
        .await
        .convert_error()?;
    Ok(CacheGeneration::new(
        scope.unwrap_or_default(),
        key.unwrap_or_default(),
    ))
}

/// Read-through cache of query results, stored as JSON strings with a TTL.
///
/// Every key and scope has a generation counter. Invalidation bumps it, and
/// a write only lands while the counters still match the ones read before
/// the value was loaded (`WATCH` + `MULTI`).
#[derive(Clone)]
pub struct RedisQueryCache {
    db: RedisDatabase,
    ttl_seconds: u64,
}

impl RedisQueryCache {
    pub fn new(db: RedisDatabase) -> error_stack::Result<Self, KernelError> {
        let ttl_seconds = env_or(CACHE_TTL_SECONDS, DEFAULT_TTL_SECONDS)?;
        Ok(Self { db, ttl_seconds })
    }
}

#[async_trait::async_trait]
impl QueryCache for RedisQueryCache {
    async fn generation(
        &self,
        key: &CacheKey,
    ) -> error_stack::Result<CacheGeneration, KernelError> {
        let mut con = self.db.connection().await?;
        read_generation(&mut con, key).await
    }

    async fn get<T>(&self, key: &CacheKey) -> error_stack::Result<Option<T>, KernelError>
    where
        T: for<'de> Deserialize<'de> + Send,
    {
        let mut con = self.db.connection().await?;
        let raw: Option<String> = con.get(cache_key(key)).await.convert_error()?;
        raw.map(|raw| serde_json::from_str(&raw))
            .transpose()
            .convert_error()
    }

    async fn set<T>(
        &self,
        key: &CacheKey,
        value: &T,
        generation: &CacheGeneration,
    ) -> error_stack::Result<bool, KernelError>
    where
        T: Serialize + Sync,
    {
        let raw = serde_json::to_string(value).convert_error()?;
        let mut con = self.db.connection().await?;
        redis::cmd("WATCH")
            .arg(scope_generation(key.scope()))
            .arg(key_generation(key))
            .query_async::<_, ()>(&mut con)
            .await
            .convert_error()?;
        if &read_generation(&mut con, key).await? != generation {
            redis::cmd("UNWATCH")
                .query_async::<_, ()>(&mut con)
                .await
                .convert_error()?;
            return Ok(false);
        }
        // EXEC answers nil when a watched counter moved after the check.
        let committed: Option<Vec<redis::Value>> = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(cache_key(key))
            .arg(raw)
            .arg("EX")
            .arg(self.ttl_seconds)
            .query_async(&mut con)
            .await
            .convert_error()?;
        Ok(committed.is_some())
    }

    #[tracing::instrument(skip(self))]
    async fn invalidate(&self, key: &CacheKey) -> error_stack::Result<(), KernelError> {
        let mut con = self.db.connection().await?;
        redis::pipe()
            .atomic()
            .incr(key_generation(key), 1)
            .ignore()
            .del(cache_key(key))
            .ignore()
            .query_async::<_, ()>(&mut con)
            .await
            .convert_error()
    }

    #[tracing::instrument(skip(self))]
    async fn invalidate_scope(&self, scope: &str) -> error_stack::Result<(), KernelError> {
        let mut con = self.db.connection().await?;
        con.incr::<_, _, ()>(scope_generation(scope), 1)
            .await
            .convert_error()?;
        let keys = {
            let mut found = con
                .scan_match::<_, String>(scope_pattern(scope))
                .await
                .convert_error()?;
            let mut keys = Vec::new();
            while let Some(key) = found.next_item().await {
                keys.push(key);
            }
            keys
        };
        if keys.is_empty() {
            return Ok(());
        }
        tracing::debug!("dropping {} cached entries", keys.len());
        con.del::<_, ()>(keys).await.convert_error()
    }
}
