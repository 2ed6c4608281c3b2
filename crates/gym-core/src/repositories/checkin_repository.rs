//! Check-in repository trait (port)

use async_trait::async_trait;
use gym_shared::EntityId;

use crate::domain::{Checkin, CheckinView, NewCheckin};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckinRepository: Send + Sync {
    /// Newest first.
    async fn list(&self) -> Result<Vec<CheckinView>, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<CheckinView>, DomainError>;
    async fn create(&self, checkin: &NewCheckin) -> Result<Checkin, DomainError>;
    /// Stamps `check_out_time` only while it is still null. `None` when no
    /// open check-in matched.
    async fn check_out(&self, id: EntityId) -> Result<Option<Checkin>, DomainError>;
    async fn delete(&self, id: EntityId) -> Result<u64, DomainError>;
}
