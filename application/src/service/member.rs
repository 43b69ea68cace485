use error_stack::Report;

use kernel::interface::cache::{CacheKey, DependOnQueryCache};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{AreaQuery, DependOnAreaQuery, DependOnMemberQuery, MemberQuery};
use kernel::interface::update::{DependOnMemberModifier, MemberModifier};
use kernel::prelude::entity::{
    AreaId, ContactNumber, IdentityNumber, Member, MemberAddress, MemberId, MemberName,
    ReferenceNumber, Subscription,
};
use kernel::prelude::search::SearchQuery;
use kernel::prelude::validation::Violations;
use kernel::KernelError;

use crate::service::cache::{
    invalidate, invalidate_scope, read_cached, write_cached, Lookup,
};
use crate::transfer::{
    CreateMemberDto, DeleteMemberDto, GetMemberDto, GetMembersOfAreaDto, GetNextReferenceDto,
    MemberDto, NextReferenceDto, UpdateMemberDto,
};

fn member_not_found(id: &MemberId) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("member {id} not found"))
}

fn area_not_found(id: &AreaId) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("area {id} not found"))
}

#[async_trait::async_trait]
pub trait GetMemberService:
    'static + Sync + Send + DependOnAreaQuery + DependOnMemberQuery + DependOnQueryCache
{
    async fn get_member(&self, dto: GetMemberDto) -> error_stack::Result<MemberDto, KernelError> {
        let id = MemberId::new(dto.id);
        let key = CacheKey::Member(id.clone());
        let generation = match read_cached::<_, Member>(self.query_cache(), &key).await {
            Lookup::Hit(member) => return Ok(MemberDto::from(member)),
            Lookup::Miss(generation) => generation,
        };

        let mut connection = self.database_connection().transact().await?;
        let member = self
            .member_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| member_not_found(&id))?;
        write_cached(self.query_cache(), &key, &member, generation).await;

        Ok(MemberDto::from(member))
    }

    /// Members of the area ordered by reference number, narrowed by the
    /// optional free-text query.
    async fn get_members_of_area(
        &self,
        dto: GetMembersOfAreaDto,
    ) -> error_stack::Result<Vec<MemberDto>, KernelError> {
        let area_id = AreaId::new(dto.area_id);
        let key = CacheKey::MembersOfArea(area_id.clone());
        let members = match read_cached::<_, Vec<Member>>(self.query_cache(), &key).await {
            Lookup::Hit(members) => members,
            Lookup::Miss(generation) => {
                let mut connection = self.database_connection().transact().await?;
                let mut members = self
                    .member_query()
                    .find_by_area_id(&mut connection, &area_id)
                    .await?;
                members.sort_by(|a, b| a.ref_no().cmp(b.ref_no()));
                write_cached(self.query_cache(), &key, &members, generation).await;
                members
            }
        };

        let query = SearchQuery::new(dto.query.unwrap_or_default());
        let members = query.filter(members);
        Ok(members.into_iter().map(MemberDto::from).collect())
    }

    async fn get_next_reference(
        &self,
        dto: GetNextReferenceDto,
    ) -> error_stack::Result<NextReferenceDto, KernelError> {
        let area_id = AreaId::new(dto.area_id);
        let mut connection = self.database_connection().transact().await?;
        let area = self
            .area_query()
            .find_by_id(&mut connection, &area_id)
            .await?
            .ok_or_else(|| area_not_found(&area_id))?;
        let members = self
            .member_query()
            .find_by_area_id(&mut connection, &area_id)
            .await?;

        let ref_no = ReferenceNumber::next_after(members.iter().map(Member::ref_no));
        let id = MemberId::derive(area.code(), &ref_no);
        Ok(NextReferenceDto {
            ref_no: ref_no.into(),
            id: id.into(),
        })
    }
}

impl<T> GetMemberService for T where
    T: DependOnAreaQuery + DependOnMemberQuery + DependOnQueryCache
{
}

#[async_trait::async_trait]
pub trait CreateMemberService:
    'static
    + Sync
    + Send
    + DependOnAreaQuery
    + DependOnMemberQuery
    + DependOnMemberModifier
    + DependOnQueryCache
{
    /// Registers a member under an area. The reference number must be unique
    /// among the area's current members; the id is derived from it.
    async fn create_member(&self, dto: CreateMemberDto) -> error_stack::Result<String, KernelError> {
        let area_id = AreaId::new(dto.area_id);
        let ref_no = ReferenceNumber::new(dto.ref_no.trim());

        let mut connection = self.database_connection().transact().await?;
        let area = self
            .area_query()
            .find_by_id(&mut connection, &area_id)
            .await?
            .ok_or_else(|| area_not_found(&area_id))?;
        let existing = self
            .member_query()
            .find_by_area_id(&mut connection, &area_id)
            .await?;

        let mut violations = Violations::new();
        violations.check(!dto.name.trim().is_empty(), "name", "name is required");
        violations.check(
            !ref_no.is_blank(),
            "ref_no",
            "reference number is required",
        );
        violations.check(
            ref_no.is_blank() || !existing.iter().any(|member| member.ref_no() == &ref_no),
            "ref_no",
            "reference number is already used in this area",
        );
        violations.into_result()?;

        let id = MemberId::derive(area.code(), &ref_no);
        let member = Member::new(
            id.clone(),
            ref_no,
            MemberName::new(dto.name.trim()),
            IdentityNumber::new(dto.identity_number),
            MemberAddress::new(dto.address),
            ContactNumber::new(dto.contact_no),
            Subscription::new(dto.subscription),
            area.code().clone(),
            area_id.clone(),
            None,
            None,
        );
        self.member_modifier()
            .create(&mut connection, &member)
            .await?;
        connection.commit().await?;
        tracing::info!("member {id} created in area {area_id}");

        invalidate(self.query_cache(), &[CacheKey::MembersOfArea(area_id)]).await;
        Ok(id.into())
    }
}

impl<T> CreateMemberService for T where
    T: DependOnAreaQuery + DependOnMemberQuery + DependOnMemberModifier + DependOnQueryCache
{
}

#[async_trait::async_trait]
pub trait UpdateMemberService:
    'static + Sync + Send + DependOnMemberQuery + DependOnMemberModifier + DependOnQueryCache
{
    /// Patches the editable profile fields; reference number and area stay.
    async fn update_member(&self, dto: UpdateMemberDto) -> error_stack::Result<(), KernelError> {
        let id = MemberId::new(dto.id);
        let mut violations = Violations::new();
        violations.check(
            dto.name.as_deref().map_or(true, |name| !name.trim().is_empty()),
            "name",
            "name must not be blank",
        );
        violations.into_result()?;

        let mut connection = self.database_connection().transact().await?;
        let mut member = self
            .member_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| member_not_found(&id))?;

        member.substitute(|member| {
            if let Some(name) = dto.name {
                *member.name = MemberName::new(name.trim());
            }
            if let Some(identity_number) = dto.identity_number {
                *member.identity_number = IdentityNumber::new(identity_number);
            }
            if let Some(address) = dto.address {
                *member.address = MemberAddress::new(address);
            }
            if let Some(contact_no) = dto.contact_no {
                *member.contact_no = ContactNumber::new(contact_no);
            }
            if let Some(subscription) = dto.subscription {
                *member.subscription = Subscription::new(subscription);
            }
        });
        self.member_modifier()
            .update(&mut connection, &member)
            .await?;
        connection.commit().await?;

        invalidate_scope(self.query_cache(), CacheKey::MEMBERS_OF_AREA).await;
        invalidate(self.query_cache(), &[CacheKey::Member(id)]).await;
        Ok(())
    }
}

impl<T> UpdateMemberService for T where
    T: DependOnMemberQuery + DependOnMemberModifier + DependOnQueryCache
{
}

#[async_trait::async_trait]
pub trait DeleteMemberService:
    'static + Sync + Send + DependOnMemberQuery + DependOnMemberModifier + DependOnQueryCache
{
    /// Removes the member only; its payments are left in place.
    async fn delete_member(&self, dto: DeleteMemberDto) -> error_stack::Result<(), KernelError> {
        let id = MemberId::new(dto.id);

        let mut connection = self.database_connection().transact().await?;
        if self
            .member_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(member_not_found(&id));
        }
        self.member_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;
        tracing::info!("member {id} deleted");

        invalidate_scope(self.query_cache(), CacheKey::MEMBERS_OF_AREA).await;
        invalidate(self.query_cache(), &[CacheKey::Member(id)]).await;
        Ok(())
    }
}

impl<T> DeleteMemberService for T where
    T: DependOnMemberQuery + DependOnMemberModifier + DependOnQueryCache
{
}
