//! Check-in entity

use chrono::{DateTime, Utc};
use gym_shared::EntityId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checkin {
    pub checkin_id: EntityId,
    pub member_id: EntityId,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub staff_id: EntityId,
}

/// Check-in joined with member and staff names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckinView {
    pub checkin_id: EntityId,
    pub member_id: EntityId,
    pub staff_id: EntityId,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub first_name: String,
    pub last_name: String,
    pub staff_name: String,
}

impl CheckinView {
    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCheckin {
    pub member_id: EntityId,
    pub staff_id: EntityId,
}
