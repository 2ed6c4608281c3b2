//! User repository trait (port)

use async_trait::async_trait;
use gym_shared::EntityId;

use crate::domain::{NewUser, User};
use crate::error::DomainError;
use crate::update::UpdatePlan;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    /// True when another row (not `exclude`) already holds `username`.
    async fn username_taken(
        &self,
        username: &str,
        exclude: Option<EntityId>,
    ) -> Result<bool, DomainError>;
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
    /// Returns the number of rows changed.
    async fn apply(&self, plan: &UpdatePlan) -> Result<u64, DomainError>;
    async fn delete(&self, id: EntityId) -> Result<u64, DomainError>;
}
