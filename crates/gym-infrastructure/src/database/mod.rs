//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod error;
pub mod plan;
pub mod postgres;

pub use connection::{create_pool, run_migrations};
pub use postgres::{
    PgCheckinRepository, PgMemberRepository, PgPackageRepository, PgPaymentRepository,
    PgUserRepository,
};
