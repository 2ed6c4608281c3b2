use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use gym_core::domain::{NewUser, User};
use gym_core::error::DomainError;
use gym_core::repositories::UserRepository;
use gym_core::update::UpdatePlan;
use gym_shared::{EntityId, Role, UserStatus};

use crate::database::error::{map_error, Action};
use crate::database::plan;

const TABLE: &str = "users";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    username: String,
    password_hash: String,
    full_name: String,
    role: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role: Role::parse(&row.role).unwrap_or_default(),
            // Anything unrecognised must not be able to log in.
            status: UserStatus::parse(&row.status).unwrap_or(UserStatus::Inactive),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, full_name, role, status, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, full_name, role, status, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, full_name, role, status, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(row.map(User::from))
    }

    async fn username_taken(
        &self,
        username: &str,
        exclude: Option<EntityId>,
    ) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 AND ($2::INT IS NULL OR id <> $2))",
        )
        .bind(username)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Read, e))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        info!("Creating user: {}", user.username);

        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (username, password_hash, full_name, role, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, password_hash, full_name, role, status, created_at, updated_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
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
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| map_error(TABLE, Action::Delete { entity: "user", id }, e))
    }
}
