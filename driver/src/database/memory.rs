use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use error_stack::Report;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::subscribe::{PaymentChangeSubscriber, PaymentChanges};
use kernel::prelude::entity::{Area, AreaId, Member, MemberId, Payment, PaymentId};
use kernel::KernelError;

pub use self::{area::*, cache::*, member::*, payment::*, session::*};

mod area;
mod cache;
mod member;
mod payment;
mod session;

#[derive(Debug, Clone, Default)]
struct Store {
    areas: BTreeMap<AreaId, Area>,
    members: HashMap<MemberId, Member>,
    payments: HashMap<PaymentId, Payment>,
}

/// Process-local store used for tests and local runs without Postgres.
///
/// Transactions are serialized: each one holds the store lock until it is
/// committed or dropped, and works on a copy so dropping discards changes.
#[derive(Clone)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<Store>>,
    changes: broadcast::Sender<()>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            store: Arc::new(Mutex::new(Store::default())),
            changes,
        }
    }

    /// Areas are provisioned outside the application.
    pub async fn seed_area(&self, area: Area) {
        let mut store = self.store.lock().await;
        store.areas.insert(area.id().clone(), area);
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = self.store.clone().lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryTransaction {
            guard,
            working,
            changes: self.changes.clone(),
            payments_changed: false,
        })
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Store>,
    working: Store,
    changes: broadcast::Sender<()>,
    payments_changed: bool,
}

impl InMemoryTransaction {
    fn store(&self) -> &Store {
        &self.working
    }

    fn store_mut(&mut self) -> &mut Store {
        &mut self.working
    }

    fn payments_mut(&mut self) -> &mut HashMap<PaymentId, Payment> {
        self.payments_changed = true;
        &mut self.working.payments
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let Self {
            mut guard,
            working,
            changes,
            payments_changed,
        } = self;
        *guard = working;
        drop(guard);
        if payments_changed {
            // no receivers is fine
            let _ = changes.send(());
        }
        Ok(())
    }
}

pub struct InMemoryPaymentChanges(broadcast::Receiver<()>);

#[async_trait::async_trait]
impl PaymentChanges for InMemoryPaymentChanges {
    async fn next_change(&mut self) -> error_stack::Result<(), KernelError> {
        match self.0.recv().await {
            Ok(()) | Err(RecvError::Lagged(_)) => Ok(()),
            Err(RecvError::Closed) => Err(Report::new(KernelError::Internal)
                .attach_printable("payment change feed closed")),
        }
    }
}

#[async_trait::async_trait]
impl PaymentChangeSubscriber for InMemoryDatabase {
    type Changes = InMemoryPaymentChanges;
    async fn subscribe(&self) -> error_stack::Result<Self::Changes, KernelError> {
        Ok(InMemoryPaymentChanges(self.changes.subscribe()))
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::PaymentQuery;
    use kernel::interface::subscribe::{PaymentChangeSubscriber, PaymentChanges};
    use kernel::interface::update::PaymentModifier;
    use kernel::prelude::entity::{
        AreaId, CoveredMonths, MemberId, MonthLabel, PaidAt, Payment, PaymentAmount, PaymentId,
        PaymentStatus, PaymentYear,
    };
    use kernel::KernelError;

    use crate::database::{InMemoryDatabase, InMemoryPaymentRepository};

    fn payment() -> Payment {
        Payment::new(
            PaymentId::generate(),
            MemberId::new("KDY_1"),
            AreaId::new("KDY"),
            PaymentAmount::new(100),
            CoveredMonths::new([MonthLabel::Mar]),
            PaymentYear::new(2024),
            PaidAt::new(datetime!(2024-03-02 09:00 UTC)),
            PaymentStatus::new(PaymentStatus::COMPLETED),
            None,
            None,
        )
    }

    #[tokio::test]
    async fn dropped_transaction_discards_changes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let payment = payment();
        {
            let mut con = db.transact().await?;
            InMemoryPaymentRepository.create(&mut con, &payment).await?;
        }
        let mut con = db.transact().await?;
        let found = InMemoryPaymentRepository
            .find_by_id(&mut con, payment.id())
            .await?;
        assert!(found.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn committed_payment_write_is_signalled() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut changes = db.subscribe().await?;
        let payment = payment();

        let mut con = db.transact().await?;
        InMemoryPaymentRepository.create(&mut con, &payment).await?;
        con.commit().await?;
        changes.next_change().await?;

        let mut con = db.transact().await?;
        let found = InMemoryPaymentRepository
            .find_by_id(&mut con, payment.id())
            .await?;
        assert_eq!(found, Some(payment));
        Ok(())
    }
}
