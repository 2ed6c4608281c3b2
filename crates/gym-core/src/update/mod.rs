//! Field sets and primary-key scoped update plans.

pub mod field;
pub mod planner;

pub use field::{Column, FieldSet, FieldValue, Table};
pub use planner::{Assignment, UpdatePlan};
