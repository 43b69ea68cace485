use serde::{Deserialize, Serialize};

use kernel::interface::cache::{CacheGeneration, CacheKey, QueryCache};

/// Outcome of a cache read. A miss carries the generation seen before the
/// store is queried, or `None` when the cache could not be asked.
pub(crate) enum Lookup<T> {
    Hit(T),
    Miss(Option<CacheGeneration>),
}

/// Cached value for `key`, if any. A failing cache is treated as a miss.
pub(crate) async fn read_cached<C, T>(cache: &C, key: &CacheKey) -> Lookup<T>
where
    C: QueryCache,
    T: for<'de> Deserialize<'de> + Send,
{
    let generation = match cache.generation(key).await {
        Ok(generation) => Some(generation),
        Err(report) => {
            tracing::warn!("cache generation of {key} unavailable: {report:?}");
            None
        }
    };
    match cache.get::<T>(key).await {
        Ok(Some(value)) => {
            tracing::debug!("cache hit: {key}");
            Lookup::Hit(value)
        }
        Ok(None) => Lookup::Miss(generation),
        Err(report) => {
            tracing::warn!("cache read of {key} failed, falling back to store: {report:?}");
            Lookup::Miss(generation)
        }
    }
}

/// Stores a freshly loaded value unless `key` was invalidated since
/// `generation` was read.
pub(crate) async fn write_cached<C, T>(
    cache: &C,
    key: &CacheKey,
    value: &T,
    generation: Option<CacheGeneration>,
) where
    C: QueryCache,
    T: Serialize + Sync,
{
    let Some(generation) = generation else {
        return;
    };
    match cache.set(key, value, &generation).await {
        Ok(true) => {}
        Ok(false) => tracing::debug!("{key} invalidated while loading, not cached"),
        Err(report) => tracing::warn!("cache write of {key} failed: {report:?}"),
    }
}

pub(crate) async fn invalidate<C: QueryCache>(cache: &C, keys: &[CacheKey]) {
    for key in keys {
        if let Err(report) = cache.invalidate(key).await {
            tracing::error!("failed to invalidate {key}: {report:?}");
        }
    }
}

pub(crate) async fn invalidate_scope<C: QueryCache>(cache: &C, scope: &str) {
    if let Err(report) = cache.invalidate_scope(scope).await {
        tracing::error!("failed to invalidate scope {scope}: {report:?}");
    }
}

#[cfg(test)]
mod test {
    use serde::{Deserialize, Serialize};

    use driver::database::InMemoryQueryCache;
    use kernel::interface::cache::{CacheGeneration, CacheKey, QueryCache};
    use kernel::prelude::entity::{AreaId, MemberId};
    use kernel::KernelError;

    use super::{read_cached, write_cached, Lookup};

    /// Cache where a concurrent write commits and invalidates right before
    /// every store.
    struct WriterInBetween {
        inner: InMemoryQueryCache,
        scope: Option<&'static str>,
    }

    #[async_trait::async_trait]
    impl QueryCache for WriterInBetween {
        async fn generation(
            &self,
            key: &CacheKey,
        ) -> error_stack::Result<CacheGeneration, KernelError> {
            self.inner.generation(key).await
        }

        async fn get<T>(&self, key: &CacheKey) -> error_stack::Result<Option<T>, KernelError>
        where
            T: for<'de> Deserialize<'de> + Send,
        {
            self.inner.get(key).await
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
            match self.scope {
                Some(scope) => self.inner.invalidate_scope(scope).await?,
                None => self.inner.invalidate(key).await?,
            }
            self.inner.set(key, value, generation).await
        }

        async fn invalidate(&self, key: &CacheKey) -> error_stack::Result<(), KernelError> {
            self.inner.invalidate(key).await
        }

        async fn invalidate_scope(&self, scope: &str) -> error_stack::Result<(), KernelError> {
            self.inner.invalidate_scope(scope).await
        }
    }

    #[tokio::test]
    async fn load_overtaken_by_invalidation_is_not_cached() {
        let cache = WriterInBetween {
            inner: InMemoryQueryCache::new(),
            scope: None,
        };
        let key = CacheKey::Member(MemberId::new("KDY_1"));

        let Lookup::Miss(generation) = read_cached::<_, String>(&cache, &key).await else {
            panic!("empty cache should miss");
        };
        write_cached(&cache, &key, &"before the edit".to_string(), generation).await;

        assert!(!cache.inner.contains(&key).await);
    }

    #[tokio::test]
    async fn list_overtaken_by_scope_invalidation_is_not_cached() {
        let cache = WriterInBetween {
            inner: InMemoryQueryCache::new(),
            scope: Some(CacheKey::MEMBERS_OF_AREA),
        };
        let key = CacheKey::MembersOfArea(AreaId::new("KDY"));

        let Lookup::Miss(generation) = read_cached::<_, Vec<String>>(&cache, &key).await else {
            panic!("empty cache should miss");
        };
        write_cached(&cache, &key, &vec!["KDY_1".to_string()], generation).await;

        assert!(!cache.inner.contains(&key).await);
    }

    #[tokio::test]
    async fn undisturbed_load_is_cached() {
        let cache = InMemoryQueryCache::new();
        let key = CacheKey::Member(MemberId::new("KDY_1"));

        let Lookup::Miss(generation) = read_cached::<_, String>(&cache, &key).await else {
            panic!("empty cache should miss");
        };
        write_cached(&cache, &key, &"current".to_string(), generation).await;

        let Lookup::Hit(cached) = read_cached::<_, String>(&cache, &key).await else {
            panic!("value should be cached");
        };
        assert_eq!(cached, "current");
    }
}
