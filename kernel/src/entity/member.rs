mod id;
mod profile;
mod reference;

pub use self::{id::*, profile::*, reference::*};
use crate::entity::{AreaCode, AreaId, PaidAt, PaymentAmount};
use destructure::{Destructure, Mutation};
use serde::{Deserialize, Serialize};
use vodca::References;

/// A registered member of an area. The id is derived from the owning area's
/// code and the member's reference number, so neither may change after
/// creation.
#[derive(
    Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, Mutation, References,
)]
pub struct Member {
    id: MemberId,
    ref_no: ReferenceNumber,
    name: MemberName,
    identity_number: IdentityNumber,
    address: MemberAddress,
    contact_no: ContactNumber,
    subscription: Subscription,
    area_code: AreaCode,
    area_id: AreaId,
    last_payment: Option<PaymentAmount>,
    last_payment_date: Option<PaidAt>,
}

impl Member {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: MemberId,
        ref_no: ReferenceNumber,
        name: MemberName,
        identity_number: IdentityNumber,
        address: MemberAddress,
        contact_no: ContactNumber,
        subscription: Subscription,
        area_code: AreaCode,
        area_id: AreaId,
        last_payment: Option<PaymentAmount>,
        last_payment_date: Option<PaidAt>,
    ) -> Self {
        Self {
            id,
            ref_no,
            name,
            identity_number,
            address,
            contact_no,
            subscription,
            area_code,
            area_id,
            last_payment,
            last_payment_date,
        }
    }

    /// Whether a payment made at `paid_at` is at least as recent as the
    /// cached last payment.
    pub fn is_newer_payment(&self, paid_at: &PaidAt) -> bool {
        match &self.last_payment_date {
            None => true,
            Some(last) => paid_at.as_ref() >= last.as_ref(),
        }
    }
}
