use time::OffsetDateTime;

use kernel::prelude::entity::{DestructMember, Member};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MemberDto {
    pub id: String,
    pub ref_no: String,
    pub name: String,
    pub identity_number: String,
    pub address: String,
    pub contact_no: String,
    pub subscription: String,
    pub area_code: String,
    pub area_id: String,
    pub last_payment: Option<i64>,
    pub last_payment_date: Option<OffsetDateTime>,
}

impl From<Member> for MemberDto {
    fn from(value: Member) -> Self {
        let DestructMember {
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
        } = value.into_destruct();
        Self {
            id: id.into(),
            ref_no: ref_no.into(),
            name: name.into(),
            identity_number: identity_number.into(),
            address: address.into(),
            contact_no: contact_no.into(),
            subscription: subscription.into(),
            area_code: area_code.into(),
            area_id: area_id.into(),
            last_payment: last_payment.map(Into::into),
            last_payment_date: last_payment_date.map(Into::into),
        }
    }
}

pub struct GetMemberDto {
    pub id: String,
}

pub struct GetMembersOfAreaDto {
    pub area_id: String,
    pub query: Option<String>,
}

pub struct GetNextReferenceDto {
    pub area_id: String,
}

/// Reference number the next member of an area would get, and the id it
/// would derive to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NextReferenceDto {
    pub ref_no: String,
    pub id: String,
}

pub struct CreateMemberDto {
    pub area_id: String,
    pub ref_no: String,
    pub name: String,
    pub identity_number: String,
    pub address: String,
    pub contact_no: String,
    pub subscription: String,
}

pub struct UpdateMemberDto {
    pub id: String,
    pub name: Option<String>,
    pub identity_number: Option<String>,
    pub address: Option<String>,
    pub contact_no: Option<String>,
    pub subscription: Option<String>,
}

pub struct DeleteMemberDto {
    pub id: String,
}
