//! Field validation
//!
//! Every entity exposes `check_field` (format rules for one submitted value),
//! `check_update` (partial update) and `check_create`. Store-backed checks
//! (row existence, foreign keys, uniqueness) are run by the services around
//! these pure rule sets.

pub mod rules;
pub mod member;
pub mod package;
pub mod user;
pub mod payment;

use serde_json::Value;

use crate::error::DomainError;
use crate::update::{Column, FieldSet, FieldValue};

/// Raw request body of a create or partial update
pub type Payload = serde_json::Map<String, Value>;

/// Rejects an empty payload and any key outside the entity's column set.
pub fn whitelist<F: Column>(payload: &Payload) -> Result<Vec<(F, &Value)>, DomainError> {
    if payload.is_empty() {
        return Err(DomainError::NoFieldsProvided);
    }
    whitelisted_entries(payload)
}

fn whitelisted_entries<F: Column>(payload: &Payload) -> Result<Vec<(F, &Value)>, DomainError> {
    payload
        .iter()
        .map(|(key, value)| {
            F::from_key(key)
                .map(|field| (field, value))
                .ok_or_else(|| DomainError::InvalidField(key.clone()))
        })
        .collect()
}

/// Whitelist for create payloads: every `required` field must be present
/// and non-null.
pub fn whitelist_create<'a, F: Column>(
    payload: &'a Payload,
    required: &[F],
) -> Result<Vec<(F, &'a Value)>, DomainError> {
    let entries = whitelisted_entries(payload)?;
    for field in required {
        let present = entries
            .iter()
            .any(|(f, value)| f == field && !value.is_null());
        if !present {
            return Err(DomainError::MissingField(field.key().to_string()));
        }
    }
    Ok(entries)
}

fn collect<F: Column>(
    entries: &[(F, &Value)],
    check: impl Fn(F, &Value) -> Result<FieldValue, DomainError>,
) -> Result<FieldSet<F>, DomainError> {
    let mut fields = FieldSet::new();
    for (field, value) in entries {
        fields.set(*field, check(*field, value)?);
    }
    Ok(fields)
}

fn text<F: Column>(fields: &FieldSet<F>, field: F) -> Result<String, DomainError> {
    fields
        .get(field)
        .and_then(FieldValue::as_text)
        .map(str::to_owned)
        .ok_or_else(|| DomainError::MissingField(field.key().to_string()))
}

fn optional_text<F: Column>(fields: &FieldSet<F>, field: F) -> Option<String> {
    fields.get(field).and_then(FieldValue::as_text).map(str::to_owned)
}

fn integer<F: Column>(fields: &FieldSet<F>, field: F) -> Result<i32, DomainError> {
    fields
        .get(field)
        .and_then(FieldValue::as_integer)
        .ok_or_else(|| DomainError::MissingField(field.key().to_string()))
}

fn number<F: Column>(fields: &FieldSet<F>, field: F) -> Result<f64, DomainError> {
    fields
        .get(field)
        .and_then(FieldValue::as_number)
        .ok_or_else(|| DomainError::MissingField(field.key().to_string()))
}
