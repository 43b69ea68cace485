use serde::{Deserialize, Serialize};
use std::iter::Sum;
use vodca::{AsRefln, Fromln};

/// Whole currency units. Stored records without an amount read as zero.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct PaymentAmount(i64);

impl PaymentAmount {
    pub fn new(amount: impl Into<i64>) -> Self {
        Self(amount.into())
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl<'a> Sum<&'a PaymentAmount> for PaymentAmount {
    fn sum<I: Iterator<Item = &'a PaymentAmount>>(iter: I) -> Self {
        Self(iter.fold(0i64, |total, amount| total.saturating_add(amount.0)))
    }
}
