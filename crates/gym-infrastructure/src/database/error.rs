//! Translation of store failures into domain errors
//!
//! Pre-checks in the services are a fast path; the schema constraints are
//! what actually guard uniqueness and references, so their violations must
//! come back as the same domain errors the pre-checks would have produced.

use gym_core::DomainError;
use gym_shared::EntityId;
use sqlx::error::ErrorKind;
use tracing::error;

/// What the failed statement was doing.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    Read,
    Write,
    Delete { entity: &'static str, id: EntityId },
}

pub(crate) fn map_error(table: &'static str, action: Action, e: sqlx::Error) -> DomainError {
    if let Some(db) = e.as_database_error() {
        let column = db
            .constraint()
            .map(|c| constraint_column(table, c).to_string())
            .unwrap_or_else(|| table.to_string());

        match (db.kind(), action) {
            (ErrorKind::UniqueViolation, _) => return DomainError::AlreadyExists(column),
            (ErrorKind::ForeignKeyViolation, Action::Delete { entity, id }) => {
                return DomainError::StillReferenced(format!("{} {}", entity, id));
            }
            (ErrorKind::ForeignKeyViolation, _) => {
                return DomainError::invalid(column, "references a record that does not exist");
            }
            (ErrorKind::CheckViolation, _) => {
                return DomainError::invalid(column, "violates a table constraint");
            }
            _ => {}
        }
    }

    error!("Database error ({:?} on {}): {}", action, table, e);
    DomainError::DatabaseError(e.to_string())
}

/// `members_package_id_fkey` on `members` names the `package_id` column.
fn constraint_column<'a>(table: &str, constraint: &'a str) -> &'a str {
    let rest = constraint
        .strip_prefix(table)
        .and_then(|r| r.strip_prefix('_'))
        .unwrap_or(constraint);
    ["_fkey", "_key", "_check"]
        .iter()
        .find_map(|suffix| rest.strip_suffix(suffix))
        .unwrap_or(rest)
}
