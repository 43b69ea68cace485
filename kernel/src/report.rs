//! Collection totals computed over payment lists.
//!
//! The functions here never touch storage. Services narrow the list with a
//! query first; the filters below are still applied so a full scan gives the
//! same answer.

use serde::{Deserialize, Serialize};
use time::macros::time;
use time::OffsetDateTime;
use vodca::References;

use crate::entity::{MonthLabel, Payment, PaymentAmount, PaymentYear};

/// Local-day bounds, `[00:00:00, 23:59:59]` inclusive on both ends.
#[derive(Debug, Clone, Copy, Eq, PartialEq, References)]
pub struct DayWindow {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl DayWindow {
    /// The day `now` falls on, in `now`'s own offset.
    pub fn containing(now: OffsetDateTime) -> Self {
        Self {
            start: now.replace_time(time!(00:00:00)),
            end: now.replace_time(time!(23:59:59)),
        }
    }

    pub fn contains(&self, at: &OffsetDateTime) -> bool {
        &self.start <= at && at <= &self.end
    }
}

/// Current month label and year as seen from `now`.
pub fn current_period(now: OffsetDateTime) -> (MonthLabel, PaymentYear) {
    (MonthLabel::from(now.month()), PaymentYear::new(now.year()))
}

pub fn daily_total<'a, I>(payments: I, window: &DayWindow) -> PaymentAmount
where
    I: IntoIterator<Item = &'a Payment>,
{
    payments
        .into_iter()
        .filter(|payment| window.contains(payment.paid_at().as_ref()))
        .map(Payment::amount)
        .sum()
}

/// Each payment counts once, however many months it covers.
pub fn monthly_total<'a, I>(payments: I, month: MonthLabel, year: PaymentYear) -> PaymentAmount
where
    I: IntoIterator<Item = &'a Payment>,
{
    payments
        .into_iter()
        .filter(|payment| payment.months().contains(month) && payment.year() == &year)
        .map(Payment::amount)
        .sum()
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct MonthlyCollection {
    month: MonthLabel,
    year: PaymentYear,
    total: PaymentAmount,
}

impl MonthlyCollection {
    pub fn new(month: MonthLabel, year: PaymentYear, total: PaymentAmount) -> Self {
        Self { month, year, total }
    }
}

/// Twelve buckets, January first, keyed on the payment's received month.
/// Payments without a received month, or with one outside `0..12`, are
/// skipped.
pub fn yearly_history<'a, I>(payments: I, year: PaymentYear) -> Vec<MonthlyCollection>
where
    I: IntoIterator<Item = &'a Payment>,
{
    let mut totals = [0i64; 12];
    for payment in payments {
        if payment.payment_year().as_ref() != Some(&year) {
            continue;
        }
        let Some(month) = payment.payment_month().as_ref().and_then(|m| m.label()) else {
            continue;
        };
        if let Some(bucket) = totals.get_mut(month.index()) {
            *bucket = bucket.saturating_add(*payment.amount().as_ref());
        }
    }
    MonthLabel::ALL
        .into_iter()
        .zip(totals)
        .map(|(month, total)| MonthlyCollection::new(month, year, PaymentAmount::new(total)))
        .collect()
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::OffsetDateTime;

    use super::{current_period, daily_total, monthly_total, yearly_history, DayWindow};
    use crate::entity::{
        AreaId, CoveredMonths, MemberId, MonthLabel, PaidAt, Payment, PaymentAmount, PaymentId,
        PaymentMonth, PaymentStatus, PaymentYear,
    };

    fn payment(
        amount: i64,
        months: &[MonthLabel],
        year: i32,
        paid_at: OffsetDateTime,
        received: Option<(i32, i32)>,
    ) -> Payment {
        Payment::new(
            PaymentId::generate(),
            MemberId::new("KDY_1"),
            AreaId::new("KDY"),
            PaymentAmount::new(amount),
            CoveredMonths::new(months.iter().copied()),
            PaymentYear::new(year),
            PaidAt::new(paid_at),
            PaymentStatus::new(PaymentStatus::COMPLETED),
            received.map(|(month, _)| PaymentMonth::new(month)),
            received.map(|(_, year)| PaymentYear::new(year)),
        )
    }

    #[test]
    fn daily_window_is_inclusive() {
        let now = datetime!(2024-03-15 14:30 +05:30);
        let window = DayWindow::containing(now);
        let payments = vec![
            payment(100, &[MonthLabel::Mar], 2024, datetime!(2024-03-15 00:00 +05:30), None),
            payment(200, &[MonthLabel::Mar], 2024, datetime!(2024-03-15 23:59:59 +05:30), None),
            payment(400, &[MonthLabel::Mar], 2024, datetime!(2024-03-14 23:59:59 +05:30), None),
            payment(800, &[MonthLabel::Mar], 2024, datetime!(2024-03-16 00:00 +05:30), None),
        ];
        assert_eq!(daily_total(&payments, &window), PaymentAmount::new(300));
    }

    #[test]
    fn daily_window_ends_at_last_whole_second() {
        let window = DayWindow::containing(datetime!(2024-03-15 09:00 UTC));
        let late = payment(
            50,
            &[MonthLabel::Mar],
            2024,
            datetime!(2024-03-15 23:59:59.5 UTC),
            None,
        );
        assert_eq!(daily_total([&late], &window), PaymentAmount::new(0));
    }

    #[test]
    fn daily_window_compares_instants_across_offsets() {
        let window = DayWindow::containing(datetime!(2024-03-15 12:00 +05:30));
        // 2024-03-14 20:00 UTC is 2024-03-15 01:30 local.
        let early = payment(70, &[], 2024, datetime!(2024-03-14 20:00 UTC), None);
        assert_eq!(daily_total([&early], &window), PaymentAmount::new(70));
    }

    #[test]
    fn monthly_total_counts_multi_month_payment_once() {
        let payments = vec![
            payment(
                600,
                &[MonthLabel::Feb, MonthLabel::Mar, MonthLabel::Apr],
                2024,
                datetime!(2024-02-02 10:00 UTC),
                None,
            ),
            payment(150, &[MonthLabel::Mar], 2023, datetime!(2023-03-02 10:00 UTC), None),
            payment(90, &[MonthLabel::Jan], 2024, datetime!(2024-03-02 10:00 UTC), None),
        ];
        let (month, year) = current_period(datetime!(2024-03-20 08:00 UTC));
        assert_eq!(month, MonthLabel::Mar);
        assert_eq!(monthly_total(&payments, month, year), PaymentAmount::new(600));
        assert_eq!(
            monthly_total(&payments, MonthLabel::Feb, year),
            PaymentAmount::new(600)
        );
    }

    #[test]
    fn yearly_history_buckets_by_received_month() {
        let paid_at = datetime!(2024-03-01 10:00 UTC);
        let payments = vec![
            payment(500, &[MonthLabel::Mar], 2024, paid_at, Some((2, 2024))),
            payment(300, &[MonthLabel::Mar], 2023, paid_at, Some((2, 2023))),
        ];
        let history = yearly_history(&payments, PaymentYear::new(2024));
        assert_eq!(history.len(), 12);
        for (index, bucket) in history.iter().enumerate() {
            let expected = if index == 2 { 500 } else { 0 };
            assert_eq!(bucket.total(), &PaymentAmount::new(expected));
            assert_eq!(bucket.year(), &PaymentYear::new(2024));
        }
        assert_eq!(history[2].month(), &MonthLabel::Mar);
    }

    #[test]
    fn yearly_history_drops_out_of_range_and_missing_months() {
        let paid_at = datetime!(2024-03-01 10:00 UTC);
        let payments = vec![
            payment(10, &[], 2024, paid_at, Some((12, 2024))),
            payment(20, &[], 2024, paid_at, Some((-1, 2024))),
            payment(40, &[], 2024, paid_at, None),
            payment(80, &[], 2024, paid_at, Some((11, 2024))),
        ];
        let history = yearly_history(&payments, PaymentYear::new(2024));
        let total: i64 = history.iter().map(|bucket| *bucket.total().as_ref()).sum();
        assert_eq!(total, 80);
        assert_eq!(history[11].total(), &PaymentAmount::new(80));
    }

    #[test]
    fn missing_amount_counts_as_zero() {
        let window = DayWindow::containing(datetime!(2024-03-15 09:00 UTC));
        let zero = payment(0, &[MonthLabel::Mar], 2024, datetime!(2024-03-15 10:00 UTC), None);
        assert_eq!(daily_total([&zero], &window), PaymentAmount::default());
    }
}
