use time::macros::datetime;
use time::OffsetDateTime;

use driver::account::ConfiguredAccount;
use driver::clock::FixedClock;
use driver::database::{
    InMemoryAreaRepository, InMemoryDatabase, InMemoryMemberRepository,
    InMemoryPaymentRepository, InMemoryQueryCache, InMemorySessionStore,
};
use kernel::interface::cache::DependOnQueryCache;
use kernel::interface::clock::DependOnClock;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnAreaQuery, DependOnMemberQuery, DependOnPaymentQuery};
use kernel::interface::session::{DependOnAccountVerifier, DependOnSessionStore};
use kernel::interface::subscribe::DependOnPaymentChangeSubscriber;
use kernel::interface::update::{DependOnMemberModifier, DependOnPaymentModifier};
use kernel::prelude::entity::{Area, AreaCode, AreaId, AreaName, AreaShortName, CreatedAt};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse";

/// Service module wired to the in-memory store, seeded with areas `KDY`
/// (code `KDY/01`) and `GLE`.
pub struct TestModule {
    db: InMemoryDatabase,
    cache: InMemoryQueryCache,
    sessions: InMemorySessionStore,
    account: ConfiguredAccount,
    clock: FixedClock,
}

impl TestModule {
    pub async fn new() -> Self {
        Self::at(datetime!(2024-03-15 10:30 +05:30)).await
    }

    pub async fn at(now: OffsetDateTime) -> Self {
        let db = InMemoryDatabase::new();
        db.seed_area(area("KDY", "KDY/01", "Kandy")).await;
        db.seed_area(area("GLE", "GLE", "Galle")).await;
        Self {
            db,
            cache: InMemoryQueryCache::new(),
            sessions: InMemorySessionStore::new(),
            account: ConfiguredAccount::with_password(ADMIN_EMAIL, ADMIN_PASSWORD)
                .expect("admin password should hash"),
            clock: FixedClock::new(now),
        }
    }

    pub fn cache(&self) -> &InMemoryQueryCache {
        &self.cache
    }
}

fn area(id: &str, code: &str, name: &str) -> Area {
    Area::new(
        AreaId::new(id),
        AreaCode::new(code),
        AreaName::new(name),
        AreaShortName::new(id),
        None,
        CreatedAt::new(datetime!(2023-01-01 00:00 UTC)),
    )
}

impl DependOnDatabaseConnection for TestModule {
    type DatabaseConnection = InMemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.db
    }
}

impl DependOnAreaQuery for TestModule {
    type AreaQuery = InMemoryAreaRepository;
    fn area_query(&self) -> &Self::AreaQuery {
        &InMemoryAreaRepository
    }
}

impl DependOnMemberQuery for TestModule {
    type MemberQuery = InMemoryMemberRepository;
    fn member_query(&self) -> &Self::MemberQuery {
        &InMemoryMemberRepository
    }
}

impl DependOnMemberModifier for TestModule {
    type MemberModifier = InMemoryMemberRepository;
    fn member_modifier(&self) -> &Self::MemberModifier {
        &InMemoryMemberRepository
    }
}

impl DependOnPaymentQuery for TestModule {
    type PaymentQuery = InMemoryPaymentRepository;
    fn payment_query(&self) -> &Self::PaymentQuery {
        &InMemoryPaymentRepository
    }
}

impl DependOnPaymentModifier for TestModule {
    type PaymentModifier = InMemoryPaymentRepository;
    fn payment_modifier(&self) -> &Self::PaymentModifier {
        &InMemoryPaymentRepository
    }
}

impl DependOnQueryCache for TestModule {
    type QueryCache = InMemoryQueryCache;
    fn query_cache(&self) -> &Self::QueryCache {
        &self.cache
    }
}

impl DependOnClock for TestModule {
    type Clock = FixedClock;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl DependOnAccountVerifier for TestModule {
    type AccountVerifier = ConfiguredAccount;
    fn account_verifier(&self) -> &Self::AccountVerifier {
        &self.account
    }
}

impl DependOnSessionStore for TestModule {
    type SessionStore = InMemorySessionStore;
    fn session_store(&self) -> &Self::SessionStore {
        &self.sessions
    }
}

impl DependOnPaymentChangeSubscriber for TestModule {
    type PaymentChangeSubscriber = InMemoryDatabase;
    fn payment_change_subscriber(&self) -> &Self::PaymentChangeSubscriber {
        &self.db
    }
}

impl TestModule {
    pub async fn add_member(&self, area_id: &str, ref_no: &str, name: &str) -> String {
        use crate::service::CreateMemberService;
        use crate::transfer::CreateMemberDto;

        self.create_member(CreateMemberDto {
            area_id: area_id.to_string(),
            ref_no: ref_no.to_string(),
            name: name.to_string(),
            identity_number: format!("{ref_no}V"),
            address: format!("{ref_no} Main St"),
            contact_no: "0771234567".to_string(),
            subscription: "standard".to_string(),
        })
        .await
        .expect("member should be created")
    }

    pub async fn add_payment(
        &self,
        user_id: &str,
        amount: i64,
        months: &[&str],
        year: i32,
        paid_at: OffsetDateTime,
    ) -> uuid::Uuid {
        use crate::service::CreatePaymentService;
        use crate::transfer::CreatePaymentDto;

        self.create_payment(CreatePaymentDto {
            user_id: user_id.to_string(),
            amount: Some(amount),
            months: months.iter().map(|month| month.to_string()).collect(),
            year: Some(year),
            paid_at: Some(paid_at),
            status: Some("completed".to_string()),
        })
        .await
        .expect("payment should be created")
    }
}
