use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use gym_core::domain::{NewPayment, Payment, PaymentView};
use gym_core::error::DomainError;
use gym_core::repositories::PaymentRepository;
use gym_core::update::UpdatePlan;
use gym_shared::EntityId;

use crate::database::error::{map_error, Action};
use crate::database::plan;

const TABLE: &str = "payments";

const VIEW_SELECT: &str = r#"
    SELECT p.payment_id, p.member_id, p.package_id, p.amount, p.payment_date, p.staff_id,
           m.first_name, m.last_name, pk.package_name, u.full_name AS staff_name
    FROM payments p
    JOIN members m ON p.member_id = m.member_id
    LEFT JOIN packages pk ON p.package_id = pk.package_id
    JOIN users u ON p.staff_id = u.id
"#;

pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PaymentRow {
    payment_id: i32,
    member_id: i32,
    package_id: Option<i32>,
    amount: f64,
    payment_date: DateTime<Utc>,
    staff_id: i32,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            payment_id: row.payment_id,
            member_id: row.member_id,
            package_id: row.package_id,
            amount: row.amount,
            payment_date: row.payment_date,
            staff_id: row.staff_id,
        }
    }
}

#[derive(Debug, FromRow)]
struct PaymentViewRow {
    payment_id: i32,
    member_id: i32,
    package_id: Option<i32>,
    amount: f64,
    payment_date: DateTime<Utc>,
    staff_id: i32,
    first_name: String,
    last_name: String,
    package_name: Option<String>,
    staff_name: String,
}

impl From<PaymentViewRow> for PaymentView {
    fn from(row: PaymentViewRow) -> Self {
        PaymentView {
            payment_id: row.payment_id,
            member_id: row.member_id,
            package_id: row.package_id,
            amount: row.amount,
            payment_date: row.payment_date,
            staff_id: row.staff_id,
            first_name: row.first_name,
            last_name: row.last_name,
            package_name: row.package_name,
            staff_name: row.staff_name,
        }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn list(&self) -> Result<Vec<PaymentView>, DomainError> {
        let sql = format!("{} ORDER BY p.payment_date DESC", VIEW_SELECT);
        let rows: Vec<PaymentViewRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(rows.into_iter().map(PaymentView::from).collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<PaymentView>, DomainError> {
        let sql = format!("{} WHERE p.payment_id = $1", VIEW_SELECT);
        let row: Option<PaymentViewRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_error(TABLE, Action::Read, e))?;

        Ok(row.map(PaymentView::from))
    }

    async fn create(&self, payment: &NewPayment) -> Result<Payment, DomainError> {
        let row: PaymentRow = sqlx::query_as(
            r#"
            INSERT INTO payments (member_id, package_id, amount, staff_id)
            VALUES ($1, $2, $3, $4)
            RETURNING payment_id, member_id, package_id, amount, payment_date, staff_id
            "#,
        )
        .bind(payment.member_id)
        .bind(payment.package_id)
        .bind(payment.amount)
        .bind(payment.staff_id)
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
        sqlx::query("DELETE FROM payments WHERE payment_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| map_error(TABLE, Action::Delete { entity: "payment", id }, e))
    }
}
