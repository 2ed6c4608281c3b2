use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use gym_core::domain::{Checkin, CheckinView, NewCheckin};
use gym_core::error::DomainError;
use gym_core::repositories::CheckinRepository;
use gym_shared::EntityId;

use crate::database::error::{map_error, Action};

const TABLE: &str = "checkins";

const VIEW_SELECT: &str = r#"
    SELECT c.checkin_id, c.member_id, c.staff_id, c.check_in_time, c.check_out_time,
           m.first_name, m.last_name, u.full_name AS staff_name
    FROM checkins c
    JOIN members m ON c.member_id = m.member_id
    JOIN users u ON c.staff_id = u.id
"#;

pub struct PgCheckinRepository {
    pool: PgPool,
}

impl PgCheckinRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CheckinRow {
    checkin_id: i32,
    member_id: i32,
    check_in_time: DateTime<Utc>,
    check_out_time: Option<DateTime<Utc>>,
    staff_id: i32,
}

impl From<CheckinRow> for Checkin {
    fn from(row: CheckinRow) -> Self {
        Checkin {
            checkin_id: row.checkin_id,
            member_id: row.member_id,
            check_in_time: row.check_in_time,
            check_out_time: row.check_out_time,
            staff_id: row.staff_id,
        }
    }
}

#[derive(Debug, FromRow)]
struct CheckinViewRow {
    checkin_id: i32,
    member_id: i32,
    staff_id: i32,
    check_in_time: DateTime<Utc>,
    check_out_time: Option<DateTime<Utc>>,
    first_name: String,
    last_name: String,
    staff_name: String,
}

impl From<CheckinViewRow> for CheckinView {
    fn from(row: CheckinViewRow) -> Self {
        CheckinView {
            checkin_id: row.checkin_id,
            member_id: row.member_id,
            staff_id: row.staff_id,
            check_in_time: row.check_in_time,
            check_out_time: row.check_out_time,
            first_name: row.first_name,
            last_name: row.last_name,
            staff_name: row.staff_name,
        }
    }
}

#[async_trait]
impl CheckinRepository for PgCheckinRepository {
    async fn list(&self) -> Result<Vec<CheckinView>, DomainError> {
        let sql = format!("{} ORDER BY c.check_in_time DESC", VIEW_SELECT);
        let rows: Vec<CheckinViewRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(rows.into_iter().map(CheckinView::from).collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<CheckinView>, DomainError> {
        let sql = format!("{} WHERE c.checkin_id = $1", VIEW_SELECT);
        let row: Option<CheckinViewRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(row.map(CheckinView::from))
    }

    async fn create(&self, checkin: &NewCheckin) -> Result<Checkin, DomainError> {
        let row: CheckinRow = sqlx::query_as(
            r#"
            INSERT INTO checkins (member_id, staff_id)
            VALUES ($1, $2)
            RETURNING checkin_id, member_id, check_in_time, check_out_time, staff_id
            "#,
        )
        .bind(checkin.member_id)
        .bind(checkin.staff_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Write, e))?;

        Ok(row.into())
    }

    async fn check_out(&self, id: EntityId) -> Result<Option<Checkin>, DomainError> {
        let row: Option<CheckinRow> = sqlx::query_as(
            r#"
            UPDATE checkins SET check_out_time = NOW()
            WHERE checkin_id = $1 AND check_out_time IS NULL
            RETURNING checkin_id, member_id, check_in_time, check_out_time, staff_id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_error(TABLE, Action::Write, e))?;

        Ok(row.map(Checkin::from))
    }

    async fn delete(&self, id: EntityId) -> Result<u64, DomainError> {
        sqlx::query("DELETE FROM checkins WHERE checkin_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| map_error(TABLE, Action::Delete { entity: "check-in", id }, e))
    }
}
