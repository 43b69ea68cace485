use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use kernel::interface::cache::{CacheGeneration, CacheKey, QueryCache};
use kernel::KernelError;

use crate::error::ConvertError;

#[derive(Default)]
struct Entries {
    values: HashMap<String, serde_json::Value>,
    key_generations: HashMap<String, u64>,
    scope_generations: HashMap<String, u64>,
}

impl Entries {
    fn generation(&self, key: &CacheKey) -> CacheGeneration {
        CacheGeneration::new(
            self.scope_generations
                .get(key.scope())
                .copied()
                .unwrap_or_default(),
            self.key_generations
                .get(&key.to_string())
                .copied()
                .unwrap_or_default(),
        )
    }
}

#[derive(Clone, Default)]
pub struct InMemoryQueryCache {
    entries: Arc<RwLock<Entries>>,
}

impl InMemoryQueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, key: &CacheKey) -> bool {
        self.entries
            .read()
            .await
            .values
            .contains_key(&key.to_string())
    }
}

#[async_trait::async_trait]
impl QueryCache for InMemoryQueryCache {
    async fn generation(
        &self,
        key: &CacheKey,
    ) -> error_stack::Result<CacheGeneration, KernelError> {
        Ok(self.entries.read().await.generation(key))
    }

    async fn get<T>(&self, key: &CacheKey) -> error_stack::Result<Option<T>, KernelError>
    where
        T: for<'de> Deserialize<'de> + Send,
    {
        let entry = self
            .entries
            .read()
            .await
            .values
            .get(&key.to_string())
            .cloned();
        entry.map(serde_json::from_value).transpose().convert_error()
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
        let value = serde_json::to_value(value).convert_error()?;
        let mut entries = self.entries.write().await;
        if &entries.generation(key) != generation {
            return Ok(false);
        }
        entries.values.insert(key.to_string(), value);
        Ok(true)
    }

    async fn invalidate(&self, key: &CacheKey) -> error_stack::Result<(), KernelError> {
        let key = key.to_string();
        let mut entries = self.entries.write().await;
        *entries.key_generations.entry(key.clone()).or_default() += 1;
        entries.values.remove(&key);
        Ok(())
    }

    async fn invalidate_scope(&self, scope: &str) -> error_stack::Result<(), KernelError> {
        let prefix = format!("{scope}:");
        let mut entries = self.entries.write().await;
        *entries
            .scope_generations
            .entry(scope.to_string())
            .or_default() += 1;
        entries.values.retain(|key, _| !key.starts_with(&prefix));
        Ok(())
    }
}
