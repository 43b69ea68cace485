mod code;
mod id;
mod name;
mod total_users;

pub use self::{code::*, id::*, name::*, total_users::*};
use crate::entity::common::CreatedAt;
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

/// A geographic area members are registered under. Areas are provisioned
/// out of band and only ever read by the application.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct Area {
    id: AreaId,
    code: AreaCode,
    name: AreaName,
    short_name: AreaShortName,
    total_users: Option<TotalUsers>,
    created_at: CreatedAt<Area>,
}

impl Area {
    pub fn new(
        id: AreaId,
        code: AreaCode,
        name: AreaName,
        short_name: AreaShortName,
        total_users: Option<TotalUsers>,
        created_at: CreatedAt<Area>,
    ) -> Self {
        Self {
            id,
            code,
            name,
            short_name,
            total_users,
            created_at,
        }
    }
}
