use error_stack::Report;

use kernel::interface::cache::{CacheKey, DependOnQueryCache};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{AreaQuery, DependOnAreaQuery};
use kernel::prelude::entity::{Area, AreaId};
use kernel::KernelError;

use crate::service::cache::{read_cached, write_cached, Lookup};
use crate::transfer::{AreaDto, GetAreaDto};

#[async_trait::async_trait]
pub trait GetAreaService: 'static + Sync + Send + DependOnAreaQuery + DependOnQueryCache {
    async fn get_areas(&self) -> error_stack::Result<Vec<AreaDto>, KernelError> {
        let key = CacheKey::Areas;
        let generation = match read_cached::<_, Vec<Area>>(self.query_cache(), &key).await {
            Lookup::Hit(areas) => return Ok(areas.into_iter().map(AreaDto::from).collect()),
            Lookup::Miss(generation) => generation,
        };

        let mut connection = self.database_connection().transact().await?;
        let areas = self.area_query().find_all(&mut connection).await?;
        write_cached(self.query_cache(), &key, &areas, generation).await;

        Ok(areas.into_iter().map(AreaDto::from).collect())
    }

    async fn get_area(&self, dto: GetAreaDto) -> error_stack::Result<AreaDto, KernelError> {
        let id = AreaId::new(dto.id);
        let key = CacheKey::Area(id.clone());
        let generation = match read_cached::<_, Area>(self.query_cache(), &key).await {
            Lookup::Hit(area) => return Ok(AreaDto::from(area)),
            Lookup::Miss(generation) => generation,
        };

        let mut connection = self.database_connection().transact().await?;
        let area = self
            .area_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable(format!("area {id} not found"))
            })?;
        write_cached(self.query_cache(), &key, &area, generation).await;

        Ok(AreaDto::from(area))
    }
}

impl<T> GetAreaService for T where T: DependOnAreaQuery + DependOnQueryCache {}

#[cfg(test)]
mod test {
    use kernel::interface::cache::CacheKey;
    use kernel::KernelError;

    use crate::fixture::TestModule;
    use crate::service::GetAreaService;
    use crate::transfer::GetAreaDto;

    #[tokio::test]
    async fn lists_and_caches_areas() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new().await;
        let areas = module.get_areas().await?;
        let mut ids = areas.iter().map(|area| area.id.as_str()).collect::<Vec<_>>();
        ids.sort();
        assert_eq!(ids, vec!["GLE", "KDY"]);
        assert!(module.cache().contains(&CacheKey::Areas).await);

        let cached = module.get_areas().await?;
        assert_eq!(cached, areas);
        Ok(())
    }

    #[tokio::test]
    async fn get_area_by_id() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new().await;
        let area = module
            .get_area(GetAreaDto {
                id: "KDY".to_string(),
            })
            .await?;
        assert_eq!(area.code, "KDY/01");
        assert_eq!(area.name, "Kandy");

        let missing = module
            .get_area(GetAreaDto {
                id: "NONE".to_string(),
            })
            .await;
        let report = missing.expect_err("unknown area");
        assert_eq!(report.current_context(), &KernelError::NotFound);
        Ok(())
    }
}
