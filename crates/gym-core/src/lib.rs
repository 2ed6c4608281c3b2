//! # Gym Core
//!
//! Domain entities, field validation, update planning, repository traits and
//! services for the gym backend.

pub mod domain;
pub mod validation;
pub mod update;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, ErrorKind};
