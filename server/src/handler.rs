use driver::account::ConfiguredAccount;
use driver::clock::SystemClock;
use driver::database::{
    PostgresAreaRepository, PostgresDatabase, PostgresMemberRepository,
    PostgresPaymentRepository, RedisDatabase, RedisQueryCache, RedisSessionStore,
};
use kernel::interface::cache::DependOnQueryCache;
use kernel::interface::clock::DependOnClock;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnAreaQuery, DependOnMemberQuery, DependOnPaymentQuery};
use kernel::interface::session::{DependOnAccountVerifier, DependOnSessionStore};
use kernel::interface::subscribe::DependOnPaymentChangeSubscriber;
use kernel::interface::update::{DependOnMemberModifier, DependOnPaymentModifier};
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;
use vodca::References;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }

    pub fn handler(&self) -> &Handler {
        &self.0
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
    cache: RedisQueryCache,
    sessions: RedisSessionStore,
    account: ConfiguredAccount,
    clock: SystemClock,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        let redis = RedisDatabase::new()?;
        let cache = RedisQueryCache::new(redis.clone())?;
        let sessions = RedisSessionStore::new(redis)?;
        let account = ConfiguredAccount::new()?;
        let clock = SystemClock::new()?;

        Ok(Self {
            pgpool,
            cache,
            sessions,
            account,
            clock,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnAreaQuery for Handler {
    type AreaQuery = PostgresAreaRepository;
    fn area_query(&self) -> &Self::AreaQuery {
        &PostgresAreaRepository
    }
}

impl DependOnMemberQuery for Handler {
    type MemberQuery = PostgresMemberRepository;
    fn member_query(&self) -> &Self::MemberQuery {
        &PostgresMemberRepository
    }
}

impl DependOnMemberModifier for Handler {
    type MemberModifier = PostgresMemberRepository;
    fn member_modifier(&self) -> &Self::MemberModifier {
        &PostgresMemberRepository
    }
}

impl DependOnPaymentQuery for Handler {
    type PaymentQuery = PostgresPaymentRepository;
    fn payment_query(&self) -> &Self::PaymentQuery {
        &PostgresPaymentRepository
    }
}

impl DependOnPaymentModifier for Handler {
    type PaymentModifier = PostgresPaymentRepository;
    fn payment_modifier(&self) -> &Self::PaymentModifier {
        &PostgresPaymentRepository
    }
}

impl DependOnQueryCache for Handler {
    type QueryCache = RedisQueryCache;
    fn query_cache(&self) -> &Self::QueryCache {
        &self.cache
    }
}

impl DependOnSessionStore for Handler {
    type SessionStore = RedisSessionStore;
    fn session_store(&self) -> &Self::SessionStore {
        &self.sessions
    }
}

impl DependOnAccountVerifier for Handler {
    type AccountVerifier = ConfiguredAccount;
    fn account_verifier(&self) -> &Self::AccountVerifier {
        &self.account
    }
}

impl DependOnClock for Handler {
    type Clock = SystemClock;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl DependOnPaymentChangeSubscriber for Handler {
    type PaymentChangeSubscriber = PostgresDatabase;
    fn payment_change_subscriber(&self) -> &Self::PaymentChangeSubscriber {
        &self.pgpool
    }
}
