//! Executes an [`UpdatePlan`] with every value bound as a parameter.

use gym_core::update::{FieldValue, UpdatePlan};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgPool, Postgres};
use tracing::debug;

pub(crate) async fn execute(pool: &PgPool, plan: &UpdatePlan) -> Result<u64, sqlx::Error> {
    let sql = plan.sql();
    debug!(table = plan.table(), key = plan.key(), "{}", sql);

    let query = plan
        .assignments()
        .iter()
        .fold(sqlx::query(&sql), |query, assignment| bind(query, &assignment.value));

    let result = query.bind(plan.key()).execute(pool).await?;
    Ok(result.rows_affected())
}

fn bind<'q>(query: Query<'q, Postgres, PgArguments>, value: &FieldValue) -> Query<'q, Postgres, PgArguments> {
    match value {
        FieldValue::Text(v) => query.bind(v.clone()),
        FieldValue::Integer(v) => query.bind(*v),
        FieldValue::SmallInt(v) => query.bind(*v),
        FieldValue::Number(v) => query.bind(*v),
        FieldValue::Timestamp(v) => query.bind(*v),
    }
}
