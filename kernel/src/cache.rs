use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use vodca::References;

use crate::entity::{AreaId, MemberId};
use crate::KernelError;

/// Keys of cached read results. Mutations invalidate the keys whose
/// contents they change so the next read goes to the store.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum CacheKey {
    Areas,
    Area(AreaId),
    Member(MemberId),
    MembersOfArea(AreaId),
    PaymentsOfMember(MemberId),
    PaymentsOfArea(AreaId),
}

impl CacheKey {
    pub const MEMBERS_OF_AREA: &'static str = "user-area";

    pub fn scope(&self) -> &'static str {
        match self {
            CacheKey::Areas => "areas",
            CacheKey::Area(_) => "area",
            CacheKey::Member(_) => "user",
            CacheKey::MembersOfArea(_) => Self::MEMBERS_OF_AREA,
            CacheKey::PaymentsOfMember(_) => "user-payment",
            CacheKey::PaymentsOfArea(_) => "area-payment",
        }
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Areas => f.write_str(self.scope()),
            CacheKey::Area(id) | CacheKey::MembersOfArea(id) | CacheKey::PaymentsOfArea(id) => {
                write!(f, "{}:{}", self.scope(), id)
            }
            CacheKey::Member(id) | CacheKey::PaymentsOfMember(id) => {
                write!(f, "{}:{}", self.scope(), id)
            }
        }
    }
}

/// Invalidation counters of a key and of its scope, read before loading a
/// value. A value loaded under an older generation must not be stored.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, References)]
pub struct CacheGeneration {
    scope: u64,
    key: u64,
}

impl CacheGeneration {
    pub fn new(scope: u64, key: u64) -> Self {
        Self { scope, key }
    }
}

#[async_trait::async_trait]
pub trait QueryCache: 'static + Sync + Send {
    async fn generation(&self, key: &CacheKey)
        -> error_stack::Result<CacheGeneration, KernelError>;

    async fn get<T>(&self, key: &CacheKey) -> error_stack::Result<Option<T>, KernelError>
    where
        T: for<'de> Deserialize<'de> + Send;

    /// Stores `value` only while `key` is still at `generation`. Returns
    /// whether it was stored.
    async fn set<T>(
        &self,
        key: &CacheKey,
        value: &T,
        generation: &CacheGeneration,
    ) -> error_stack::Result<bool, KernelError>
    where
        T: Serialize + Sync;

    /// Bumps the key's generation and drops its value.
    async fn invalidate(&self, key: &CacheKey) -> error_stack::Result<(), KernelError>;

    /// Bumps the scope's generation and drops every key of it, e.g. all
    /// `user-area:*` lists.
    async fn invalidate_scope(&self, scope: &str) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnQueryCache: 'static + Sync + Send {
    type QueryCache: QueryCache;
    fn query_cache(&self) -> &Self::QueryCache;
}
