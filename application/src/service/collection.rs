use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{DependOnPaymentQuery, PaymentQuery};
use kernel::interface::subscribe::{
    DependOnPaymentChangeSubscriber, PaymentChangeSubscriber, PaymentChanges,
};
use kernel::prelude::entity::PaymentYear;
use kernel::prelude::report::{
    current_period, daily_total, monthly_total, yearly_history, DayWindow,
};
use kernel::KernelError;

use crate::transfer::{
    DailyCollectionDto, GetYearlyHistoryDto, MonthlyCollectionDto,
};

#[async_trait::async_trait]
pub trait GetCollectionService:
    'static + Sync + Send + DependOnPaymentQuery + DependOnClock
{
    /// Sum of the payments received today, local midnight to 23:59:59.
    async fn get_daily_collection(&self) -> error_stack::Result<DailyCollectionDto, KernelError> {
        let window = DayWindow::containing(self.clock().now());
        let mut connection = self.database_connection().transact().await?;
        let payments = self
            .payment_query()
            .find_paid_between(&mut connection, window.start(), window.end())
            .await?;
        let total = daily_total(&payments, &window);
        Ok(DailyCollectionDto {
            date: window.start().date(),
            total: total.into(),
        })
    }

    /// Sum of the payments covering the current month of the current year.
    async fn get_monthly_collection(
        &self,
    ) -> error_stack::Result<MonthlyCollectionDto, KernelError> {
        let (month, year) = current_period(self.clock().now());
        let mut connection = self.database_connection().transact().await?;
        let payments = self
            .payment_query()
            .find_covering(&mut connection, &month, &year)
            .await?;
        let total = monthly_total(&payments, month, year);
        Ok(MonthlyCollectionDto {
            month: month.code().to_string(),
            year: year.into(),
            total: total.into(),
        })
    }

    async fn get_yearly_history(
        &self,
        dto: GetYearlyHistoryDto,
    ) -> error_stack::Result<Vec<MonthlyCollectionDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let payments = self.payment_query().find_all(&mut connection).await?;
        let history = yearly_history(&payments, PaymentYear::new(dto.year));
        Ok(history.into_iter().map(MonthlyCollectionDto::from).collect())
    }
}

impl<T> GetCollectionService for T where T: DependOnPaymentQuery + DependOnClock {}

/// Open subscription to payment changes, yielding the daily total once up
/// front and again after every change.
pub struct DailyCollectionWatch<C> {
    changes: C,
    primed: bool,
}

#[async_trait::async_trait]
pub trait WatchCollectionService:
    'static + Sync + Send + GetCollectionService + DependOnPaymentChangeSubscriber
{
    async fn watch_daily_collection(
        &self,
    ) -> error_stack::Result<
        DailyCollectionWatch<<Self::PaymentChangeSubscriber as PaymentChangeSubscriber>::Changes>,
        KernelError,
    > {
        let changes = self.payment_change_subscriber().subscribe().await?;
        Ok(DailyCollectionWatch {
            changes,
            primed: false,
        })
    }

    async fn next_daily_collection(
        &self,
        watch: &mut DailyCollectionWatch<
            <Self::PaymentChangeSubscriber as PaymentChangeSubscriber>::Changes,
        >,
    ) -> error_stack::Result<DailyCollectionDto, KernelError> {
        if watch.primed {
            watch.changes.next_change().await?;
        }
        watch.primed = true;
        self.get_daily_collection().await
    }
}

impl<T> WatchCollectionService for T where
    T: GetCollectionService + DependOnPaymentChangeSubscriber
{
}

#[cfg(test)]
mod test {
    use time::macros::{date, datetime};

    use kernel::KernelError;

    use crate::fixture::TestModule;
    use crate::service::{DeletePaymentService, GetCollectionService, WatchCollectionService};
    use crate::transfer::{DeletePaymentDto, GetYearlyHistoryDto};

    #[tokio::test]
    async fn daily_total_covers_local_day_inclusive() -> error_stack::Result<(), KernelError> {
        let module = TestModule::at(datetime!(2024-03-15 18:00 +05:30)).await;
        let user_id = module.add_member("KDY", "1", "Ali").await;
        for (amount, paid_at) in [
            (1, datetime!(2024-03-15 00:00:00 +05:30)),
            (10, datetime!(2024-03-15 23:59:59 +05:30)),
            (100, datetime!(2024-03-14 23:59:59 +05:30)),
            (1000, datetime!(2024-03-15 23:59:59.5 +05:30)),
            (10000, datetime!(2024-03-15 12:00 UTC)),
        ] {
            module
                .add_payment(&user_id, amount, &["MAR"], 2024, paid_at)
                .await;
        }

        let daily = module.get_daily_collection().await?;
        assert_eq!(daily.date, date!(2024-03-15));
        assert_eq!(daily.total, 10011);
        Ok(())
    }

    #[tokio::test]
    async fn monthly_total_counts_each_payment_once() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new().await;
        let user_id = module.add_member("KDY", "1", "Ali").await;
        module
            .add_payment(&user_id, 600, &["FEB", "MAR", "APR"], 2024, datetime!(2024-02-01 09:00 UTC))
            .await;
        module
            .add_payment(&user_id, 200, &["MAR"], 2024, datetime!(2024-03-05 09:00 UTC))
            .await;
        module
            .add_payment(&user_id, 50, &["MAR"], 2023, datetime!(2024-03-05 09:00 UTC))
            .await;
        module
            .add_payment(&user_id, 70, &["JAN"], 2024, datetime!(2024-03-05 09:00 UTC))
            .await;

        let monthly = module.get_monthly_collection().await?;
        assert_eq!(monthly.month, "MAR");
        assert_eq!(monthly.year, 2024);
        assert_eq!(monthly.total, 800);
        Ok(())
    }

    #[tokio::test]
    async fn yearly_history_has_twelve_buckets() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new().await;
        let user_id = module.add_member("KDY", "1", "Ali").await;
        module
            .add_payment(&user_id, 500, &["MAR"], 2024, datetime!(2024-03-10 09:00 UTC))
            .await;
        module
            .add_payment(&user_id, 300, &["MAR"], 2023, datetime!(2023-03-10 09:00 UTC))
            .await;

        let history = module
            .get_yearly_history(GetYearlyHistoryDto { year: 2024 })
            .await?;
        assert_eq!(history.len(), 12);
        assert_eq!(history[0].month, "JAN");
        assert_eq!(history[11].month, "DEC");
        for (index, bucket) in history.iter().enumerate() {
            assert_eq!(bucket.year, 2024);
            let expected = if index == 2 { 500 } else { 0 };
            assert_eq!(bucket.total, expected, "bucket {index}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn watch_emits_current_total_then_after_each_change(
    ) -> error_stack::Result<(), KernelError> {
        let module = TestModule::new().await;
        let user_id = module.add_member("KDY", "1", "Ali").await;
        let mut watch = module.watch_daily_collection().await?;

        let first = module.next_daily_collection(&mut watch).await?;
        assert_eq!(first.total, 0);

        let id = module
            .add_payment(&user_id, 120, &["MAR"], 2024, datetime!(2024-03-15 08:00 +05:30))
            .await;
        let second = module.next_daily_collection(&mut watch).await?;
        assert_eq!(second.total, 120);

        module.delete_payment(DeletePaymentDto { id }).await?;
        let third = module.next_daily_collection(&mut watch).await?;
        assert_eq!(third.total, 0);
        Ok(())
    }
}
