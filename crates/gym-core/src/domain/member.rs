//! Member entity

use chrono::NaiveDateTime;
use gym_shared::utils::timestamp;
use gym_shared::EntityId;
use serde::Serialize;

use crate::update::{Column, Table};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub member_id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub package_id: EntityId,
    #[serde(serialize_with = "timestamp::serialize")]
    pub start_date: NaiveDateTime,
    #[serde(serialize_with = "timestamp::option::serialize")]
    pub expiry_date: Option<NaiveDateTime>,
    pub photo_url: Option<String>,
    pub is_active: i16,
}

/// Member with the name of its package
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberDetail {
    #[serde(flatten)]
    pub member: Member,
    pub package_name: String,
}

/// Listing row joined with the package
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberSummary {
    pub member_id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub start_date: NaiveDateTime,
    #[serde(serialize_with = "timestamp::option::serialize")]
    pub expiry_date: Option<NaiveDateTime>,
    pub is_active: i16,
    pub package_name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub package_id: EntityId,
    pub start_date: NaiveDateTime,
    pub expiry_date: Option<NaiveDateTime>,
    pub photo_url: Option<String>,
    pub is_active: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberField {
    FirstName,
    LastName,
    PhoneNumber,
    PackageId,
    StartDate,
    ExpiryDate,
    PhotoUrl,
    IsActive,
}

impl Column for MemberField {
    const ALL: &'static [Self] = &[
        MemberField::FirstName,
        MemberField::LastName,
        MemberField::PhoneNumber,
        MemberField::PackageId,
        MemberField::StartDate,
        MemberField::ExpiryDate,
        MemberField::PhotoUrl,
        MemberField::IsActive,
    ];

    fn key(self) -> &'static str {
        match self {
            MemberField::FirstName => "first_name",
            MemberField::LastName => "last_name",
            MemberField::PhoneNumber => "phone_number",
            MemberField::PackageId => "package_id",
            MemberField::StartDate => "start_date",
            MemberField::ExpiryDate => "expiry_date",
            MemberField::PhotoUrl => "photo_url",
            MemberField::IsActive => "is_active",
        }
    }
}

impl Table for Member {
    type Field = MemberField;

    const TABLE: &'static str = "members";
    const PRIMARY_KEY: &'static str = "member_id";
}
