use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use gym_core::domain::{NewPackage, Package};
use gym_core::error::DomainError;
use gym_core::repositories::PackageRepository;
use gym_core::update::UpdatePlan;
use gym_shared::EntityId;

use crate::database::error::{map_error, Action};
use crate::database::plan;

const TABLE: &str = "packages";

pub struct PgPackageRepository {
    pool: PgPool,
}

impl PgPackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PackageRow {
    package_id: i32,
    package_name: String,
    price: f64,
    duration_days: i32,
    description: Option<String>,
}

impl From<PackageRow> for Package {
    fn from(row: PackageRow) -> Self {
        Package {
            package_id: row.package_id,
            package_name: row.package_name,
            price: row.price,
            duration_days: row.duration_days,
            description: row.description,
        }
    }
}

#[async_trait]
impl PackageRepository for PgPackageRepository {
    async fn list(&self) -> Result<Vec<Package>, DomainError> {
        let rows: Vec<PackageRow> = sqlx::query_as(
            "SELECT package_id, package_name, price, duration_days, description FROM packages ORDER BY package_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(rows.into_iter().map(Package::from).collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Package>, DomainError> {
        let row: Option<PackageRow> = sqlx::query_as(
            "SELECT package_id, package_name, price, duration_days, description FROM packages WHERE package_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(row.map(Package::from))
    }

    async fn exists(&self, id: EntityId) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM packages WHERE package_id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_error(TABLE, Action::Read, e))
    }

    async fn name_taken(&self, name: &str, exclude: Option<EntityId>) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM packages
                WHERE package_name = $1 AND ($2::INT IS NULL OR package_id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Read, e))
    }

    async fn create(&self, package: &NewPackage) -> Result<Package, DomainError> {
        let row: PackageRow = sqlx::query_as(
            r#"
            INSERT INTO packages (package_name, price, duration_days, description)
            VALUES ($1, $2, $3, $4)
            RETURNING package_id, package_name, price, duration_days, description
            "#,
        )
        .bind(&package.package_name)
        .bind(package.price)
        .bind(package.duration_days)
        .bind(&package.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Write, e))?;

        Ok(row.into())
    }

    async fn apply(&self, update: &UpdatePlan) -> Result<u64, DomainError> {
        plan::execute(&self.pool, update)
            .await
            .map_err(|e| map_error(TABLE, Action::Write, e))
    }

    async fn delete(&self, id: EntityId) -> Result<u64, DomainError> {
        sqlx::query("DELETE FROM packages WHERE package_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| map_error(TABLE, Action::Delete { entity: "package", id }, e))
    }
}
