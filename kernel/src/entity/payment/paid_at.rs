use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};
use vodca::{AsRefln, Fromln};

use crate::entity::{PaymentMonth, PaymentYear};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PaidAt(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl PaidAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }

    /// Month index (0 = January) and year the payment falls in, seen from
    /// `offset`.
    pub fn period(&self, offset: UtcOffset) -> (PaymentMonth, PaymentYear) {
        let local = self.0.to_offset(offset);
        let month = i32::from(u8::from(local.month())) - 1;
        (PaymentMonth::new(month), PaymentYear::new(local.year()))
    }
}

#[cfg(test)]
mod test {
    use time::macros::{datetime, offset};

    use crate::entity::{PaidAt, PaymentMonth, PaymentYear};

    #[test]
    fn period_follows_local_offset() {
        let paid_at = PaidAt::new(datetime!(2023-12-31 20:00 UTC));
        assert_eq!(
            paid_at.period(offset!(UTC)),
            (PaymentMonth::new(11), PaymentYear::new(2023))
        );
        assert_eq!(
            paid_at.period(offset!(+5:30)),
            (PaymentMonth::new(0), PaymentYear::new(2024))
        );
    }
}
