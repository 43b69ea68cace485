use sqlx::PgConnection;
use time::OffsetDateTime;

use kernel::interface::query::MemberQuery;
use kernel::interface::update::MemberModifier;
use kernel::prelude::entity::{
    AreaCode, AreaId, ContactNumber, IdentityNumber, Member, MemberAddress, MemberId, MemberName,
    PaidAt, PaymentAmount, ReferenceNumber, Subscription,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresMemberRepository;

#[async_trait::async_trait]
impl MemberQuery for PostgresMemberRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        PgMemberInternal::find_by_id(con, id).await
    }

    async fn find_by_area_id(
        &self,
        con: &mut PostgresTransaction,
        area_id: &AreaId,
    ) -> error_stack::Result<Vec<Member>, KernelError> {
        PgMemberInternal::find_by_area_id(con, area_id).await
    }
}

#[async_trait::async_trait]
impl MemberModifier for PostgresMemberRepository {
    type Transaction = PostgresTransaction;
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        PgMemberInternal::create(con, member).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        PgMemberInternal::update(con, member).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<(), KernelError> {
        PgMemberInternal::delete(con, member_id).await
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: String,
    ref_no: String,
    name: String,
    identity_number: String,
    address: String,
    contact_no: String,
    subscription: String,
    area_code: String,
    area_id: String,
    last_payment: Option<i64>,
    last_payment_date: Option<OffsetDateTime>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member::new(
            MemberId::new(row.id),
            ReferenceNumber::new(row.ref_no),
            MemberName::new(row.name),
            IdentityNumber::new(row.identity_number),
            MemberAddress::new(row.address),
            ContactNumber::new(row.contact_no),
            Subscription::new(row.subscription),
            AreaCode::new(row.area_code),
            AreaId::new(row.area_id),
            row.last_payment.map(PaymentAmount::new),
            row.last_payment_date.map(PaidAt::new),
        )
    }
}

pub(in crate::database) struct PgMemberInternal;

impl PgMemberInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        let row = sqlx::query_as::<_, MemberRow>(
            // language=postgresql
            r#"
            SELECT id, ref_no, name, identity_number, address, contact_no, subscription,
                   area_code, area_id, last_payment, last_payment_date
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Member::from))
    }

    async fn find_by_area_id(
        con: &mut PgConnection,
        area_id: &AreaId,
    ) -> error_stack::Result<Vec<Member>, KernelError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            // language=postgresql
            r#"
            SELECT id, ref_no, name, identity_number, address, contact_no, subscription,
                   area_code, area_id, last_payment, last_payment_date
            FROM members
            WHERE area_id = $1
            "#,
        )
        .bind(area_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn create(con: &mut PgConnection, member: &Member) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO members (id, ref_no, name, identity_number, address, contact_no,
                                 subscription, area_code, area_id, last_payment, last_payment_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(member.id().as_ref())
        .bind(member.ref_no().as_ref())
        .bind(member.name().as_ref())
        .bind(member.identity_number().as_ref())
        .bind(member.address().as_ref())
        .bind(member.contact_no().as_ref())
        .bind(member.subscription().as_ref())
        .bind(member.area_code().as_ref())
        .bind(member.area_id().as_ref())
        .bind(member.last_payment().map(i64::from))
        .bind(member.last_payment_date().map(OffsetDateTime::from))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, member: &Member) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE members
            SET name = $2, identity_number = $3, address = $4, contact_no = $5,
                subscription = $6, last_payment = $7, last_payment_date = $8
            WHERE id = $1
            "#,
        )
        .bind(member.id().as_ref())
        .bind(member.name().as_ref())
        .bind(member.identity_number().as_ref())
        .bind(member.address().as_ref())
        .bind(member.contact_no().as_ref())
        .bind(member.subscription().as_ref())
        .bind(member.last_payment().map(i64::from))
        .bind(member.last_payment_date().map(OffsetDateTime::from))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        member_id: &MemberId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM members
            WHERE id = $1
            "#,
        )
        .bind(member_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::MemberQuery;
    use kernel::interface::update::MemberModifier;
    use kernel::prelude::entity::{
        AreaCode, AreaId, ContactNumber, IdentityNumber, Member, MemberAddress, MemberId,
        MemberName, ReferenceNumber, Subscription,
    };
    use kernel::KernelError;
    use uuid::Uuid;

    use crate::database::postgres::{PostgresDatabase, PostgresMemberRepository};

    fn member(area_code: &AreaCode, area_id: &AreaId, ref_no: &str) -> Member {
        let ref_no = ReferenceNumber::new(ref_no);
        Member::new(
            MemberId::derive(area_code, &ref_no),
            ref_no,
            MemberName::new("Nimal"),
            IdentityNumber::new("901234567V"),
            MemberAddress::new("12 Temple Rd"),
            ContactNumber::new("0771234567"),
            Subscription::new("standard"),
            area_code.clone(),
            area_id.clone(),
            None,
            None,
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn crud() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let area_code = AreaCode::new(Uuid::new_v4().to_string());
        let area_id = AreaId::new(Uuid::new_v4().to_string());
        let created = member(&area_code, &area_id, "1");

        PostgresMemberRepository.create(&mut con, &created).await?;
        let found = PostgresMemberRepository
            .find_by_id(&mut con, created.id())
            .await?;
        assert_eq!(found, Some(created.clone()));

        let updated = created
            .clone()
            .reconstruct(|m| m.name = MemberName::new("Nimal Perera"));
        PostgresMemberRepository.update(&mut con, &updated).await?;
        let listed = PostgresMemberRepository
            .find_by_area_id(&mut con, &area_id)
            .await?;
        assert_eq!(listed, vec![updated.clone()]);

        PostgresMemberRepository
            .delete(&mut con, updated.id())
            .await?;
        let found = PostgresMemberRepository
            .find_by_id(&mut con, updated.id())
            .await?;
        assert!(found.is_none());
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn duplicate_id_is_concurrency_error() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let area_code = AreaCode::new(Uuid::new_v4().to_string());
        let area_id = AreaId::new(Uuid::new_v4().to_string());
        let created = member(&area_code, &area_id, "3");

        PostgresMemberRepository.create(&mut con, &created).await?;
        let duplicated = PostgresMemberRepository.create(&mut con, &created).await;
        let report = duplicated.expect_err("second insert must fail");
        assert_eq!(report.current_context(), &KernelError::Concurrency);
        Ok(())
    }
}
