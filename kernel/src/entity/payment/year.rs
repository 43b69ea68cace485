use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct PaymentYear(i32);

impl PaymentYear {
    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }
}

impl Display for PaymentYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}
