//! # Gym Shared
//!
//! Shared configuration, telemetry, constants and types for the gym backend.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
