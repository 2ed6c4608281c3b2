//! Domain errors

use gym_shared::EntityId;
use thiserror::Error;

/// Coarse classification used by the HTTP layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Authentication,
    Authorization,
    Store,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("no fields provided")]
    NoFieldsProvided,

    #[error("no fields to update")]
    NoFieldsToUpdate,

    #[error("invalid field {0}")]
    InvalidField(String),

    #[error("missing required field {0}")]
    MissingField(String),

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: EntityId },

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("check-in {0} is already checked out")]
    AlreadyCheckedOut(EntityId),

    #[error("{0} is still referenced by other records")]
    StillReferenced(String),

    #[error("user not found")]
    UnknownUsername,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is inactive")]
    UserNotActive,

    #[error("access token missing")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("admin access required")]
    AdminRequired,

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NoFieldsProvided
            | DomainError::NoFieldsToUpdate
            | DomainError::InvalidField(_)
            | DomainError::MissingField(_)
            | DomainError::InvalidValue { .. }
            | DomainError::UnknownUsername => ErrorKind::Validation,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::AlreadyExists(_)
            | DomainError::AlreadyCheckedOut(_)
            | DomainError::StillReferenced(_) => ErrorKind::Conflict,
            DomainError::InvalidCredentials
            | DomainError::MissingToken
            | DomainError::InvalidToken => ErrorKind::Authentication,
            DomainError::UserNotActive | DomainError::AdminRequired => ErrorKind::Authorization,
            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::DatabaseError(_) => ErrorKind::Store,
        }
    }
}
