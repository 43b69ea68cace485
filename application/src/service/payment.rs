use std::str::FromStr;

use error_stack::Report;

use kernel::interface::cache::{CacheKey, DependOnQueryCache};
use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnMemberQuery, DependOnPaymentQuery, MemberQuery, PaymentQuery};
use kernel::interface::update::{
    DependOnMemberModifier, DependOnPaymentModifier, MemberModifier, PaymentModifier,
};
use kernel::prelude::entity::{
    AreaId, CoveredMonths, MemberId, MonthLabel, PaidAt, Payment, PaymentAmount, PaymentId,
    PaymentStatus, PaymentYear,
};
use kernel::prelude::search::SearchQuery;
use kernel::prelude::validation::Violations;
use kernel::KernelError;
use uuid::Uuid;

use crate::service::cache::{invalidate, read_cached, write_cached, Lookup};
use crate::transfer::{
    CreatePaymentDto, DeletePaymentDto, GetPaymentsOfAreaDto, GetPaymentsOfMemberDto, PaymentDto,
    UpdatePaymentDto,
};

fn payment_not_found(id: &PaymentId) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("payment {id} not found"))
}

fn parse_months(raw: &[String], violations: &mut Violations) -> CoveredMonths {
    let mut months = Vec::with_capacity(raw.len());
    for label in raw {
        match MonthLabel::from_str(label) {
            Ok(month) => months.push(month),
            Err(error) => violations.check(false, "months", error.to_string()),
        }
    }
    violations.check(
        !raw.is_empty(),
        "months",
        "at least one month must be selected",
    );
    CoveredMonths::new(months)
}

fn check_amount(amount: i64, violations: &mut Violations) -> PaymentAmount {
    let amount = PaymentAmount::new(amount);
    violations.check(amount.is_positive(), "amount", "amount must be greater than 0");
    amount
}

fn check_status(status: &str, violations: &mut Violations) {
    violations.check(!status.trim().is_empty(), "status", "status is required");
}

/// Keys whose contents change when a payment of `user_id` in `area_id` is
/// written.
fn payment_keys(user_id: &MemberId, area_id: &AreaId) -> [CacheKey; 3] {
    [
        CacheKey::PaymentsOfMember(user_id.clone()),
        CacheKey::PaymentsOfArea(area_id.clone()),
        CacheKey::Member(user_id.clone()),
    ]
}

#[async_trait::async_trait]
pub trait GetPaymentService:
    'static + Sync + Send + DependOnPaymentQuery + DependOnQueryCache
{
    async fn get_payments_of_member(
        &self,
        dto: GetPaymentsOfMemberDto,
    ) -> error_stack::Result<Vec<PaymentDto>, KernelError> {
        let user_id = MemberId::new(dto.user_id);
        let key = CacheKey::PaymentsOfMember(user_id.clone());
        let payments = match read_cached::<_, Vec<Payment>>(self.query_cache(), &key).await {
            Lookup::Hit(payments) => payments,
            Lookup::Miss(generation) => {
                let mut connection = self.database_connection().transact().await?;
                let payments = self
                    .payment_query()
                    .find_by_user_id(&mut connection, &user_id)
                    .await?;
                write_cached(self.query_cache(), &key, &payments, generation).await;
                payments
            }
        };

        let query = SearchQuery::new(dto.query.unwrap_or_default());
        Ok(query
            .filter(payments)
            .into_iter()
            .map(PaymentDto::from)
            .collect())
    }

    async fn get_payments_of_area(
        &self,
        dto: GetPaymentsOfAreaDto,
    ) -> error_stack::Result<Vec<PaymentDto>, KernelError> {
        let area_id = AreaId::new(dto.area_id);
        let key = CacheKey::PaymentsOfArea(area_id.clone());
        let payments = match read_cached::<_, Vec<Payment>>(self.query_cache(), &key).await {
            Lookup::Hit(payments) => payments,
            Lookup::Miss(generation) => {
                let mut connection = self.database_connection().transact().await?;
                let payments = self
                    .payment_query()
                    .find_by_area_id(&mut connection, &area_id)
                    .await?;
                write_cached(self.query_cache(), &key, &payments, generation).await;
                payments
            }
        };

        let query = SearchQuery::new(dto.query.unwrap_or_default());
        Ok(query
            .filter(payments)
            .into_iter()
            .map(PaymentDto::from)
            .collect())
    }
}

impl<T> GetPaymentService for T where T: DependOnPaymentQuery + DependOnQueryCache {}

#[async_trait::async_trait]
pub trait CreatePaymentService:
    'static
    + Sync
    + Send
    + DependOnMemberQuery
    + DependOnMemberModifier
    + DependOnPaymentModifier
    + DependOnClock
    + DependOnQueryCache
{
    /// Records a payment for a member and refreshes the member's cached last
    /// payment when this one is at least as recent.
    async fn create_payment(&self, dto: CreatePaymentDto) -> error_stack::Result<Uuid, KernelError> {
        let mut violations = Violations::new();
        violations.check(dto.year.is_some(), "year", "year is required");
        let months = parse_months(&dto.months, &mut violations);
        violations.check(dto.amount.is_some(), "amount", "amount is required");
        let amount = dto.amount.map(|amount| check_amount(amount, &mut violations));
        violations.check(dto.paid_at.is_some(), "paid_at", "payment date is required");
        check_status(dto.status.as_deref().unwrap_or_default(), &mut violations);
        violations.into_result()?;

        let (Some(year), Some(amount), Some(paid_at), Some(status)) =
            (dto.year, amount, dto.paid_at, dto.status)
        else {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("payment form is incomplete"));
        };

        let user_id = MemberId::new(dto.user_id);
        let mut connection = self.database_connection().transact().await?;
        let mut member = self
            .member_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("member {user_id} not found"))
            })?;

        let paid_at = PaidAt::new(paid_at);
        let (payment_month, payment_year) = paid_at.period(self.clock().now().offset());
        let payment = Payment::new(
            PaymentId::generate(),
            user_id.clone(),
            member.area_id().clone(),
            amount,
            months,
            PaymentYear::new(year),
            paid_at,
            PaymentStatus::new(status.trim()),
            Some(payment_month),
            Some(payment_year),
        );
        self.payment_modifier()
            .create(&mut connection, &payment)
            .await?;

        if member.is_newer_payment(&paid_at) {
            member.substitute(|member| {
                *member.last_payment = Some(amount);
                *member.last_payment_date = Some(paid_at);
            });
            self.member_modifier()
                .update(&mut connection, &member)
                .await?;
        }
        connection.commit().await?;
        tracing::info!("payment {} recorded for member {user_id}", payment.id());

        invalidate(self.query_cache(), &payment_keys(&user_id, member.area_id())).await;
        Ok((*payment.id()).into())
    }
}

impl<T> CreatePaymentService for T where
    T: DependOnMemberQuery
        + DependOnMemberModifier
        + DependOnPaymentModifier
        + DependOnClock
        + DependOnQueryCache
{
}

#[async_trait::async_trait]
pub trait UpdatePaymentService:
    'static
    + Sync
    + Send
    + DependOnPaymentQuery
    + DependOnPaymentModifier
    + DependOnClock
    + DependOnQueryCache
{
    /// Patches the given fields. A new payment date re-derives the month and
    /// year the payment was received in.
    async fn update_payment(&self, dto: UpdatePaymentDto) -> error_stack::Result<(), KernelError> {
        let mut violations = Violations::new();
        let months = dto
            .months
            .as_deref()
            .map(|raw| parse_months(raw, &mut violations));
        let amount = dto.amount.map(|amount| check_amount(amount, &mut violations));
        if let Some(status) = dto.status.as_deref() {
            check_status(status, &mut violations);
        }
        violations.into_result()?;

        let id = PaymentId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        let mut payment = self
            .payment_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| payment_not_found(&id))?;

        let offset = self.clock().now().offset();
        payment.substitute(|payment| {
            if let Some(amount) = amount {
                *payment.amount = amount;
            }
            if let Some(months) = months {
                *payment.months = months;
            }
            if let Some(year) = dto.year {
                *payment.year = PaymentYear::new(year);
            }
            if let Some(paid_at) = dto.paid_at {
                let paid_at = PaidAt::new(paid_at);
                let (month, year) = paid_at.period(offset);
                *payment.paid_at = paid_at;
                *payment.payment_month = Some(month);
                *payment.payment_year = Some(year);
            }
            if let Some(status) = dto.status {
                *payment.status = PaymentStatus::new(status.trim());
            }
        });
        self.payment_modifier()
            .update(&mut connection, &payment)
            .await?;
        connection.commit().await?;

        invalidate(
            self.query_cache(),
            &payment_keys(payment.user_id(), payment.area_id()),
        )
        .await;
        Ok(())
    }
}

impl<T> UpdatePaymentService for T where
    T: DependOnPaymentQuery + DependOnPaymentModifier + DependOnClock + DependOnQueryCache
{
}

#[async_trait::async_trait]
pub trait DeletePaymentService:
    'static + Sync + Send + DependOnPaymentQuery + DependOnPaymentModifier + DependOnQueryCache
{
    async fn delete_payment(&self, dto: DeletePaymentDto) -> error_stack::Result<(), KernelError> {
        let id = PaymentId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        let payment = self
            .payment_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| payment_not_found(&id))?;
        self.payment_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;
        tracing::info!("payment {id} deleted");

        invalidate(
            self.query_cache(),
            &payment_keys(payment.user_id(), payment.area_id()),
        )
        .await;
        Ok(())
    }
}

impl<T> DeletePaymentService for T where
    T: DependOnPaymentQuery + DependOnPaymentModifier + DependOnQueryCache
{
}
