use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};
use tracing::info;

use gym_core::domain::{Member, MemberDetail, MemberSummary, NewMember};
use gym_core::error::DomainError;
use gym_core::repositories::MemberRepository;
use gym_core::update::UpdatePlan;
use gym_shared::EntityId;

use crate::database::error::{map_error, Action};
use crate::database::plan;

const TABLE: &str = "members";

pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MemberRow {
    member_id: i32,
    first_name: String,
    last_name: String,
    phone_number: Option<String>,
    package_id: i32,
    start_date: NaiveDateTime,
    expiry_date: Option<NaiveDateTime>,
    photo_url: Option<String>,
    is_active: i16,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            member_id: row.member_id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone_number: row.phone_number,
            package_id: row.package_id,
            start_date: row.start_date,
            expiry_date: row.expiry_date,
            photo_url: row.photo_url,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, FromRow)]
struct MemberDetailRow {
    #[sqlx(flatten)]
    member: MemberRow,
    package_name: String,
}

#[derive(Debug, FromRow)]
struct MemberSummaryRow {
    member_id: i32,
    first_name: String,
    last_name: String,
    phone_number: Option<String>,
    start_date: NaiveDateTime,
    expiry_date: Option<NaiveDateTime>,
    is_active: i16,
    package_name: String,
    price: f64,
}

impl From<MemberSummaryRow> for MemberSummary {
    fn from(row: MemberSummaryRow) -> Self {
        MemberSummary {
            member_id: row.member_id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone_number: row.phone_number,
            start_date: row.start_date,
            expiry_date: row.expiry_date,
            is_active: row.is_active,
            package_name: row.package_name,
            price: row.price,
        }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn list(&self) -> Result<Vec<MemberSummary>, DomainError> {
        let rows: Vec<MemberSummaryRow> = sqlx::query_as(
            r#"
            SELECT m.member_id, m.first_name, m.last_name, m.phone_number,
                   m.start_date, m.expiry_date, m.is_active,
                   p.package_name, p.price
            FROM members m
            JOIN packages p ON m.package_id = p.package_id
            ORDER BY m.member_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(rows.into_iter().map(MemberSummary::from).collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            SELECT member_id, first_name, last_name, phone_number, package_id,
                   start_date, expiry_date, photo_url, is_active
            FROM members
            WHERE member_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(row.map(Member::from))
    }

    async fn find_detail(&self, id: EntityId) -> Result<Option<MemberDetail>, DomainError> {
        let row: Option<MemberDetailRow> = sqlx::query_as(
            r#"
            SELECT m.member_id, m.first_name, m.last_name, m.phone_number, m.package_id,
                   m.start_date, m.expiry_date, m.photo_url, m.is_active,
                   p.package_name
            FROM members m
            JOIN packages p ON m.package_id = p.package_id
            WHERE m.member_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(row.map(|r| MemberDetail {
            member: r.member.into(),
            package_name: r.package_name,
        }))
    }

    async fn create(&self, member: &NewMember) -> Result<Member, DomainError> {
        info!("Creating member: {} {}", member.first_name, member.last_name);

        let row: MemberRow = sqlx::query_as(
            r#"
            INSERT INTO members (
                first_name, last_name, phone_number, package_id,
                start_date, expiry_date, photo_url, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING member_id, first_name, last_name, phone_number, package_id,
                      start_date, expiry_date, photo_url, is_active
            "#,
        )
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.phone_number)
        .bind(member.package_id)
        .bind(member.start_date)
        .bind(member.expiry_date)
        .bind(&member.photo_url)
        .bind(member.is_active)
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
        sqlx::query("DELETE FROM members WHERE member_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| map_error(TABLE, Action::Delete { entity: "member", id }, e))
    }
}
