//! Payment entity

use chrono::{DateTime, Utc};
use gym_shared::EntityId;
use serde::Serialize;

use crate::update::{Column, Table};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub payment_id: EntityId,
    pub member_id: EntityId,
    pub package_id: Option<EntityId>,
    pub amount: f64,
    pub payment_date: DateTime<Utc>,
    pub staff_id: EntityId,
}

/// Payment joined with member, package and staff names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentView {
    pub payment_id: EntityId,
    pub member_id: EntityId,
    pub package_id: Option<EntityId>,
    pub amount: f64,
    pub payment_date: DateTime<Utc>,
    pub staff_id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub package_name: Option<String>,
    pub staff_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub member_id: EntityId,
    pub package_id: Option<EntityId>,
    pub amount: f64,
    pub staff_id: EntityId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    MemberId,
    PackageId,
    Amount,
    StaffId,
}

impl Column for PaymentField {
    const ALL: &'static [Self] = &[
        PaymentField::MemberId,
        PaymentField::PackageId,
        PaymentField::Amount,
        PaymentField::StaffId,
    ];

    fn key(self) -> &'static str {
        match self {
            PaymentField::MemberId => "member_id",
            PaymentField::PackageId => "package_id",
            PaymentField::Amount => "amount",
            PaymentField::StaffId => "staff_id",
        }
    }
}

impl Table for Payment {
    type Field = PaymentField;

    const TABLE: &'static str = "payments";
    const PRIMARY_KEY: &'static str = "payment_id";
}
