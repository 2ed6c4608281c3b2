//! Check-in and check-out

use std::sync::Arc;

use gym_shared::EntityId;
use tracing::{info, warn};

use crate::domain::{Checkin, CheckinView, NewCheckin};
use crate::error::DomainError;
use crate::repositories::CheckinRepository;

pub struct CheckinService {
    checkins: Arc<dyn CheckinRepository>,
}

impl CheckinService {
    pub fn new(checkins: Arc<dyn CheckinRepository>) -> Self {
        Self { checkins }
    }

    pub async fn list(&self) -> Result<Vec<CheckinView>, DomainError> {
        self.checkins.list().await
    }

    pub async fn get(&self, id: EntityId) -> Result<CheckinView, DomainError> {
        self.checkins
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "check-in", id })
    }

    /// Records an entry. `staff_id` defaults to the authenticated caller.
    pub async fn check_in(
        &self,
        member_id: EntityId,
        staff_id: Option<EntityId>,
        principal: EntityId,
    ) -> Result<Checkin, DomainError> {
        let new_checkin = NewCheckin {
            member_id,
            staff_id: staff_id.unwrap_or(principal),
        };
        let created = self.checkins.create(&new_checkin).await?;
        info!(checkin_id = created.checkin_id, member_id, "Member checked in");
        Ok(created)
    }

    /// Sets `check_out_time` exactly once.
    pub async fn check_out(&self, id: EntityId) -> Result<Checkin, DomainError> {
        if self.get(id).await?.is_checked_out() {
            warn!(checkin_id = id, "Check-out rejected: already checked out");
            return Err(DomainError::AlreadyCheckedOut(id));
        }

        // A concurrent check-out may win between the read and the write.
        let checkin = self
            .checkins
            .check_out(id)
            .await?
            .ok_or(DomainError::AlreadyCheckedOut(id))?;
        info!(checkin_id = id, "Member checked out");
        Ok(checkin)
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        if self.checkins.delete(id).await? == 0 {
            return Err(DomainError::NotFound { entity: "check-in", id });
        }
        info!(checkin_id = id, "Check-in deleted");
        Ok(())
    }
}
