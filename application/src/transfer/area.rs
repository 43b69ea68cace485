use time::OffsetDateTime;

use kernel::prelude::entity::{Area, DestructArea};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AreaDto {
    pub id: String,
    pub code: String,
    pub name: String,
    pub short_name: String,
    pub total_users: Option<i32>,
    pub created_at: OffsetDateTime,
}

impl From<Area> for AreaDto {
    fn from(value: Area) -> Self {
        let DestructArea {
            id,
            code,
            name,
            short_name,
            total_users,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            short_name: short_name.into(),
            total_users: total_users.map(Into::into),
            created_at: created_at.into(),
        }
    }
}

pub struct GetAreaDto {
    pub id: String,
}
