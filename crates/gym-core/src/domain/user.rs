//! User (staff/admin account) entity

use chrono::{DateTime, Utc};
use gym_shared::{EntityId, Role, UserStatus};
use serde::Serialize;

use crate::update::{Column, Table};

/// Stored account. Deliberately not `Serialize`: the hash never leaves the
/// service layer except through [`UserInfo`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn can_login(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn info(&self) -> UserInfo {
        UserInfo::from(self)
    }
}

/// Public projection of a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    pub id: EntityId,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub status: UserStatus,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            status: user.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub status: UserStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Username,
    Password,
    FullName,
    Role,
    Status,
}

impl Column for UserField {
    const ALL: &'static [Self] = &[
        UserField::Username,
        UserField::Password,
        UserField::FullName,
        UserField::Role,
        UserField::Status,
    ];

    fn key(self) -> &'static str {
        match self {
            UserField::Username => "username",
            UserField::Password => "password",
            UserField::FullName => "full_name",
            UserField::Role => "role",
            UserField::Status => "status",
        }
    }

    fn column(self) -> &'static str {
        match self {
            UserField::Password => "password_hash",
            other => other.key(),
        }
    }
}

impl Table for User {
    type Field = UserField;

    const TABLE: &'static str = "users";
    const PRIMARY_KEY: &'static str = "id";
    const TOUCHES_UPDATED_AT: bool = true;
}
