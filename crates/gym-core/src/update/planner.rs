//! Update planner
//!
//! Turns a validated [`FieldSet`] into a single-row `UPDATE` whose column
//! names come from the table's closed [`Column`] set and whose values are
//! all positional parameters.

use gym_shared::EntityId;

use super::field::{Column, FieldSet, FieldValue, Table};
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: &'static str,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    table: &'static str,
    primary_key: &'static str,
    key: EntityId,
    assignments: Vec<Assignment>,
    touch_updated_at: bool,
}

impl UpdatePlan {
    pub fn for_row<T: Table>(key: EntityId, fields: FieldSet<T::Field>) -> Result<Self, DomainError> {
        if fields.is_empty() {
            return Err(DomainError::NoFieldsToUpdate);
        }

        let assignments = fields
            .into_entries()
            .into_iter()
            .map(|(field, value)| Assignment {
                column: field.column(),
                value,
            })
            .collect();

        Ok(Self {
            table: T::TABLE,
            primary_key: T::PRIMARY_KEY,
            key,
            assignments,
            touch_updated_at: T::TOUCHES_UPDATED_AT,
        })
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn key(&self) -> EntityId {
        self.key
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn value_of(&self, column: &str) -> Option<&FieldValue> {
        self.assignments
            .iter()
            .find(|a| a.column == column)
            .map(|a| &a.value)
    }

    /// Renders the statement. Parameters `$1..$n` are the assignment values
    /// in order, `$n+1` is the primary key.
    pub fn sql(&self) -> String {
        let mut sets: Vec<String> = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{} = ${}", a.column, i + 1))
            .collect();
        if self.touch_updated_at {
            sets.push("updated_at = NOW()".to_string());
        }
        format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            self.table,
            sets.join(", "),
            self.primary_key,
            self.assignments.len() + 1
        )
    }
}
