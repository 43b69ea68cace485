use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct TotalUsers(i32);

impl TotalUsers {
    pub fn new(total: impl Into<i32>) -> Self {
        Self(total.into())
    }
}
