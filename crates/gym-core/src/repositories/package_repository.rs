//! Package repository trait (port)

use async_trait::async_trait;
use gym_shared::EntityId;

use crate::domain::{NewPackage, Package};
use crate::error::DomainError;
use crate::update::UpdatePlan;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Package>, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Package>, DomainError>;
    async fn exists(&self, id: EntityId) -> Result<bool, DomainError>;
    async fn name_taken(&self, name: &str, exclude: Option<EntityId>) -> Result<bool, DomainError>;
    async fn create(&self, package: &NewPackage) -> Result<Package, DomainError>;
    async fn apply(&self, plan: &UpdatePlan) -> Result<u64, DomainError>;
    async fn delete(&self, id: EntityId) -> Result<u64, DomainError>;
}
