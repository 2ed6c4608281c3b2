//! Member repository trait (port)

use async_trait::async_trait;
use gym_shared::EntityId;

use crate::domain::{Member, MemberDetail, MemberSummary, NewMember};
use crate::error::DomainError;
use crate::update::UpdatePlan;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<MemberSummary>, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Member>, DomainError>;
    async fn find_detail(&self, id: EntityId) -> Result<Option<MemberDetail>, DomainError>;
    async fn create(&self, member: &NewMember) -> Result<Member, DomainError>;
    async fn apply(&self, plan: &UpdatePlan) -> Result<u64, DomainError>;
    async fn delete(&self, id: EntityId) -> Result<u64, DomainError>;
}
