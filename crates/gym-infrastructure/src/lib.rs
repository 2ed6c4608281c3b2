//! # Gym Infrastructure
//!
//! PostgreSQL adapters for the repository ports of `gym-core`.

pub mod database;

pub use database::{
    create_pool, run_migrations, PgCheckinRepository, PgMemberRepository, PgPackageRepository,
    PgPaymentRepository, PgUserRepository,
};

use gym_core::repositories::Repositories;
use sqlx::PgPool;
use std::sync::Arc;

/// Builds every Postgres repository over one shared pool.
pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        members: Arc::new(PgMemberRepository::new(pool.clone())),
        packages: Arc::new(PgPackageRepository::new(pool.clone())),
        checkins: Arc::new(PgCheckinRepository::new(pool.clone())),
        payments: Arc::new(PgPaymentRepository::new(pool)),
    }
}
