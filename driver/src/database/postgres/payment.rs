use std::str::FromStr;

use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::PaymentQuery;
use kernel::interface::update::PaymentModifier;
use kernel::prelude::entity::{
    AreaId, CoveredMonths, MemberId, MonthLabel, PaidAt, Payment, PaymentAmount, PaymentId,
    PaymentMonth, PaymentStatus, PaymentYear,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresPaymentRepository;

#[async_trait::async_trait]
impl PaymentQuery for PostgresPaymentRepository {
    type Transaction = PostgresTransaction;
    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        PgPaymentInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        PgPaymentInternal::find_by_id(con, id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &MemberId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        PgPaymentInternal::find_by_user_id(con, user_id).await
    }

    async fn find_by_area_id(
        &self,
        con: &mut PostgresTransaction,
        area_id: &AreaId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        PgPaymentInternal::find_by_area_id(con, area_id).await
    }

    async fn find_paid_between(
        &self,
        con: &mut PostgresTransaction,
        start: &OffsetDateTime,
        end: &OffsetDateTime,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        PgPaymentInternal::find_paid_between(con, start, end).await
    }

    async fn find_covering(
        &self,
        con: &mut PostgresTransaction,
        month: &MonthLabel,
        year: &PaymentYear,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        PgPaymentInternal::find_covering(con, month, year).await
    }
}

#[async_trait::async_trait]
impl PaymentModifier for PostgresPaymentRepository {
    type Transaction = PostgresTransaction;
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        PgPaymentInternal::create(con, payment).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        PgPaymentInternal::update(con, payment).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        payment_id: &PaymentId,
    ) -> error_stack::Result<(), KernelError> {
        PgPaymentInternal::delete(con, payment_id).await
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: String,
    area_id: String,
    amount: Option<i64>,
    months: Vec<String>,
    year: i32,
    paid_at: OffsetDateTime,
    status: String,
    payment_month: Option<i32>,
    payment_year: Option<i32>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        let months = row
            .months
            .iter()
            .filter_map(|label| match MonthLabel::from_str(label) {
                Ok(month) => Some(month),
                Err(error) => {
                    tracing::warn!("payment {} skips month: {error}", row.id);
                    None
                }
            })
            .collect::<Vec<_>>();
        Payment::new(
            PaymentId::new(row.id),
            MemberId::new(row.user_id),
            AreaId::new(row.area_id),
            PaymentAmount::new(row.amount.unwrap_or_default()),
            CoveredMonths::new(months),
            PaymentYear::new(row.year),
            PaidAt::new(row.paid_at),
            PaymentStatus::new(row.status),
            row.payment_month.map(PaymentMonth::new),
            row.payment_year.map(PaymentYear::new),
        )
    }
}

pub(in crate::database) struct PgPaymentInternal;

impl PgPaymentInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Payment>, KernelError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, area_id, amount, months, year, paid_at, status,
                   payment_month, payment_year
            FROM payments
            ORDER BY paid_at DESC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, area_id, amount, months, year, paid_at, status,
                   payment_month, payment_year
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Payment::from))
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &MemberId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, area_id, amount, months, year, paid_at, status,
                   payment_month, payment_year
            FROM payments
            WHERE user_id = $1
            ORDER BY paid_at DESC
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn find_by_area_id(
        con: &mut PgConnection,
        area_id: &AreaId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, area_id, amount, months, year, paid_at, status,
                   payment_month, payment_year
            FROM payments
            WHERE area_id = $1
            ORDER BY paid_at DESC
            "#,
        )
        .bind(area_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn find_paid_between(
        con: &mut PgConnection,
        start: &OffsetDateTime,
        end: &OffsetDateTime,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, area_id, amount, months, year, paid_at, status,
                   payment_month, payment_year
            FROM payments
            WHERE paid_at >= $1 AND paid_at <= $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn find_covering(
        con: &mut PgConnection,
        month: &MonthLabel,
        year: &PaymentYear,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, area_id, amount, months, year, paid_at, status,
                   payment_month, payment_year
            FROM payments
            WHERE year = $2 AND $1 = ANY (months)
            "#,
        )
        .bind(month.code())
        .bind(year.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn create(con: &mut PgConnection, payment: &Payment) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO payments (id, user_id, area_id, amount, months, year, paid_at, status,
                                  payment_month, payment_year)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(payment.id().as_ref())
        .bind(payment.user_id().as_ref())
        .bind(payment.area_id().as_ref())
        .bind(payment.amount().as_ref())
        .bind(payment.months().codes())
        .bind(payment.year().as_ref())
        .bind(payment.paid_at().as_ref())
        .bind(payment.status().as_ref())
        .bind(payment.payment_month().map(i32::from))
        .bind(payment.payment_year().map(i32::from))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, payment: &Payment) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE payments
            SET amount = $2, months = $3, year = $4, paid_at = $5, status = $6,
                payment_month = $7, payment_year = $8
            WHERE id = $1
            "#,
        )
        .bind(payment.id().as_ref())
        .bind(payment.amount().as_ref())
        .bind(payment.months().codes())
        .bind(payment.year().as_ref())
        .bind(payment.paid_at().as_ref())
        .bind(payment.status().as_ref())
        .bind(payment.payment_month().map(i32::from))
        .bind(payment.payment_year().map(i32::from))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        payment_id: &PaymentId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM payments
            WHERE id = $1
            "#,
        )
        .bind(payment_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::PaymentQuery;
    use kernel::interface::update::PaymentModifier;
    use kernel::prelude::entity::{
        AreaId, CoveredMonths, MemberId, MonthLabel, PaidAt, Payment, PaymentAmount, PaymentId,
        PaymentMonth, PaymentStatus, PaymentYear,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresPaymentRepository};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn crud_and_lookups() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let user_id = MemberId::new(Uuid::new_v4().to_string());
        let area_id = AreaId::new(Uuid::new_v4().to_string());
        let payment = Payment::new(
            PaymentId::generate(),
            user_id.clone(),
            area_id.clone(),
            PaymentAmount::new(1500),
            CoveredMonths::new([MonthLabel::Jan, MonthLabel::Feb]),
            PaymentYear::new(1999),
            PaidAt::new(datetime!(1999-02-03 10:00 UTC)),
            PaymentStatus::new(PaymentStatus::COMPLETED),
            Some(PaymentMonth::new(1)),
            Some(PaymentYear::new(1999)),
        );
        PostgresPaymentRepository.create(&mut con, &payment).await?;

        let found = PostgresPaymentRepository
            .find_by_id(&mut con, payment.id())
            .await?;
        assert_eq!(found, Some(payment.clone()));

        let of_user = PostgresPaymentRepository
            .find_by_user_id(&mut con, &user_id)
            .await?;
        assert_eq!(of_user, vec![payment.clone()]);
        let of_area = PostgresPaymentRepository
            .find_by_area_id(&mut con, &area_id)
            .await?;
        assert_eq!(of_area, vec![payment.clone()]);

        let covering = PostgresPaymentRepository
            .find_covering(&mut con, &MonthLabel::Feb, &PaymentYear::new(1999))
            .await?;
        assert!(covering.contains(&payment));
        let covering = PostgresPaymentRepository
            .find_covering(&mut con, &MonthLabel::Mar, &PaymentYear::new(1999))
            .await?;
        assert!(!covering.contains(&payment));

        let day = PostgresPaymentRepository
            .find_paid_between(
                &mut con,
                &datetime!(1999-02-03 00:00:00 UTC),
                &datetime!(1999-02-03 23:59:59 UTC),
            )
            .await?;
        assert!(day.contains(&payment));

        let updated = payment
            .clone()
            .reconstruct(|p| p.amount = PaymentAmount::new(2000));
        PostgresPaymentRepository.update(&mut con, &updated).await?;
        let found = PostgresPaymentRepository
            .find_by_id(&mut con, updated.id())
            .await?;
        assert_eq!(found, Some(updated.clone()));

        PostgresPaymentRepository
            .delete(&mut con, updated.id())
            .await?;
        let found = PostgresPaymentRepository
            .find_by_id(&mut con, updated.id())
            .await?;
        assert!(found.is_none());
        Ok(())
    }
}
