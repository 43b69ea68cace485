use error_stack::Report;

use kernel::interface::query::MemberQuery;
use kernel::interface::update::MemberModifier;
use kernel::prelude::entity::{AreaId, Member, MemberId};
use kernel::KernelError;

use crate::database::InMemoryTransaction;

pub struct InMemoryMemberRepository;

#[async_trait::async_trait]
impl MemberQuery for InMemoryMemberRepository {
    type Transaction = InMemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        Ok(con.store().members.get(id).cloned())
    }

    async fn find_by_area_id(
        &self,
        con: &mut InMemoryTransaction,
        area_id: &AreaId,
    ) -> error_stack::Result<Vec<Member>, KernelError> {
        let members = con
            .store()
            .members
            .values()
            .filter(|member| member.area_id() == area_id)
            .cloned()
            .collect();
        Ok(members)
    }
}

#[async_trait::async_trait]
impl MemberModifier for InMemoryMemberRepository {
    type Transaction = InMemoryTransaction;
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        let members = &mut con.store_mut().members;
        if members.contains_key(member.id()) {
            return Err(Report::new(KernelError::Concurrency)
                .attach_printable(format!("member {} already exists", member.id())));
        }
        members.insert(member.id().clone(), member.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.store_mut().members.get_mut(member.id()) {
            *stored = member.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<(), KernelError> {
        con.store_mut().members.remove(member_id);
        Ok(())
    }
}
