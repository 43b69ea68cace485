use application::transfer::{
    CreateMemberDto, DeleteMemberDto, GetMemberDto, GetMembersOfAreaDto, GetNextReferenceDto,
    UpdateMemberDto,
};
use serde::Deserialize;

use crate::controller::Intake;

/// `?q=` free-text filter shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    q: Option<String>,
}

impl SearchRequest {
    pub fn into_query(self) -> Option<String> {
        self.q
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[serde(default)]
    ref_no: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    identity_number: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    contact_no: String,
    #[serde(default)]
    subscription: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    name: Option<String>,
    identity_number: Option<String>,
    address: Option<String>,
    contact_no: Option<String>,
    subscription: Option<String>,
}

#[derive(Debug)]
pub struct GetMemberRequest {
    id: String,
}

impl GetMemberRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteMemberRequest {
    id: String,
}

impl DeleteMemberRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct NextReferenceRequest {
    area_id: String,
}

impl NextReferenceRequest {
    pub fn new(area_id: String) -> Self {
        Self { area_id }
    }
}

pub struct MemberTransformer;

impl Intake<(String, CreateMemberRequest)> for MemberTransformer {
    type To = CreateMemberDto;
    fn emit(&self, input: (String, CreateMemberRequest)) -> Self::To {
        let (area_id, input) = input;
        CreateMemberDto {
            area_id,
            ref_no: input.ref_no,
            name: input.name,
            identity_number: input.identity_number,
            address: input.address,
            contact_no: input.contact_no,
            subscription: input.subscription,
        }
    }
}

impl Intake<(String, UpdateMemberRequest)> for MemberTransformer {
    type To = UpdateMemberDto;
    fn emit(&self, input: (String, UpdateMemberRequest)) -> Self::To {
        let (id, input) = input;
        UpdateMemberDto {
            id,
            name: input.name,
            identity_number: input.identity_number,
            address: input.address,
            contact_no: input.contact_no,
            subscription: input.subscription,
        }
    }
}

impl Intake<(String, SearchRequest)> for MemberTransformer {
    type To = GetMembersOfAreaDto;
    fn emit(&self, input: (String, SearchRequest)) -> Self::To {
        let (area_id, search) = input;
        GetMembersOfAreaDto {
            area_id,
            query: search.into_query(),
        }
    }
}

impl Intake<GetMemberRequest> for MemberTransformer {
    type To = GetMemberDto;
    fn emit(&self, input: GetMemberRequest) -> Self::To {
        GetMemberDto { id: input.id }
    }
}

impl Intake<DeleteMemberRequest> for MemberTransformer {
    type To = DeleteMemberDto;
    fn emit(&self, input: DeleteMemberRequest) -> Self::To {
        DeleteMemberDto { id: input.id }
    }
}

impl Intake<NextReferenceRequest> for MemberTransformer {
    type To = GetNextReferenceDto;
    fn emit(&self, input: NextReferenceRequest) -> Self::To {
        GetNextReferenceDto {
            area_id: input.area_id,
        }
    }
}
