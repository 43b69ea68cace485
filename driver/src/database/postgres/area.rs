use sqlx::PgConnection;
use time::OffsetDateTime;

use kernel::interface::query::AreaQuery;
use kernel::prelude::entity::{
    Area, AreaCode, AreaId, AreaName, AreaShortName, CreatedAt, TotalUsers,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresAreaRepository;

#[async_trait::async_trait]
impl AreaQuery for PostgresAreaRepository {
    type Transaction = PostgresTransaction;
    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Area>, KernelError> {
        PgAreaInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &AreaId,
    ) -> error_stack::Result<Option<Area>, KernelError> {
        PgAreaInternal::find_by_id(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct AreaRow {
    id: String,
    code: String,
    name: String,
    short_name: String,
    total_users: Option<i32>,
    created_at: OffsetDateTime,
}

impl From<AreaRow> for Area {
    fn from(row: AreaRow) -> Self {
        Area::new(
            AreaId::new(row.id),
            AreaCode::new(row.code),
            AreaName::new(row.name),
            AreaShortName::new(row.short_name),
            row.total_users.map(TotalUsers::new),
            CreatedAt::new(row.created_at),
        )
    }
}

pub(in crate::database) struct PgAreaInternal;

impl PgAreaInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Area>, KernelError> {
        let rows = sqlx::query_as::<_, AreaRow>(
            // language=postgresql
            r#"
            SELECT id, code, name, short_name, total_users, created_at
            FROM areas
            ORDER BY name
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Area::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &AreaId,
    ) -> error_stack::Result<Option<Area>, KernelError> {
        let row = sqlx::query_as::<_, AreaRow>(
            // language=postgresql
            r#"
            SELECT id, code, name, short_name, total_users, created_at
            FROM areas
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Area::from))
    }

    #[cfg(test)]
    pub(in crate::database) async fn insert(
        con: &mut PgConnection,
        area: &Area,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO areas (id, code, name, short_name, total_users, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(area.id().as_ref())
        .bind(area.code().as_ref())
        .bind(area.name().as_ref())
        .bind(area.short_name().as_ref())
        .bind(area.total_users().as_ref().map(AsRef::<i32>::as_ref))
        .bind(area.created_at().as_ref())
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
    use kernel::interface::query::AreaQuery;
    use kernel::prelude::entity::{
        Area, AreaCode, AreaId, AreaName, AreaShortName, CreatedAt, TotalUsers,
    };
    use kernel::KernelError;

    use crate::database::postgres::area::PgAreaInternal;
    use crate::database::postgres::{PostgresAreaRepository, PostgresDatabase};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn find_by_id() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = AreaId::new(Uuid::new_v4().to_string());
        let area = Area::new(
            id.clone(),
            AreaCode::new("KDY/N"),
            AreaName::new("Kandy North"),
            AreaShortName::new("KN"),
            Some(TotalUsers::new(12)),
            CreatedAt::new(datetime!(2024-01-01 00:00:00 UTC)),
        );
        PgAreaInternal::insert(&mut con, &area).await?;

        let found = PostgresAreaRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(area.clone()));

        let all = PostgresAreaRepository.find_all(&mut con).await?;
        assert!(all.contains(&area));

        let missing = AreaId::new(Uuid::new_v4().to_string());
        let found = PostgresAreaRepository.find_by_id(&mut con, &missing).await?;
        assert!(found.is_none());
        Ok(())
    }
}
