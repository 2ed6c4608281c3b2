//! Primitive field rules shared by the entity rule sets.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use gym_shared::EntityId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::DomainError;

/// Latin and Thai letters (consonants, vowels and tone marks) plus whitespace.
pub static PERSON_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z\x{0E01}-\x{0E2E}\x{0E30}-\x{0E4C}\s]+$").expect("valid regex")
});

pub static USERNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid regex"));

/// English words separated by single spaces, no leading or trailing space.
pub static FULL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+( [A-Za-z]+)*$").expect("valid regex"));

pub static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid regex"));

pub static HTTP_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://\S+$").expect("valid regex"));

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

pub fn string<'a>(field: &str, value: &'a Value) -> Result<&'a str, DomainError> {
    match value {
        Value::String(s) => Ok(s.as_str()),
        Value::Null => Err(DomainError::invalid(field, "cannot be null")),
        _ => Err(DomainError::invalid(field, "must be a string")),
    }
}

/// Trimmed, non-empty string.
pub fn non_empty(field: &str, value: &Value) -> Result<String, DomainError> {
    let trimmed = string(field, value)?.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// `null` clears the field; anything else must be a non-empty string.
pub fn nullable_non_empty(field: &str, value: &Value) -> Result<Option<String>, DomainError> {
    if value.is_null() {
        return Ok(None);
    }
    non_empty(field, value).map(Some)
}

pub fn entity_id(field: &str, value: &Value) -> Result<EntityId, DomainError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|v| EntityId::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<EntityId>().ok(),
        Value::Null => return Err(DomainError::invalid(field, "cannot be null")),
        _ => None,
    };
    parsed
        .filter(|id| *id > 0)
        .ok_or_else(|| DomainError::invalid(field, "must be a positive integer"))
}

fn number(field: &str, value: &Value) -> Result<f64, DomainError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null => return Err(DomainError::invalid(field, "cannot be null")),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| DomainError::invalid(field, "must be a number"))
}

pub fn non_negative_number(field: &str, value: &Value) -> Result<f64, DomainError> {
    let v = number(field, value)?;
    if v < 0.0 {
        return Err(DomainError::invalid(field, "cannot be negative"));
    }
    Ok(v)
}

pub fn positive_number(field: &str, value: &Value) -> Result<f64, DomainError> {
    let v = number(field, value)?;
    if v <= 0.0 {
        return Err(DomainError::invalid(field, "must be greater than zero"));
    }
    Ok(v)
}

pub fn non_negative_integer(field: &str, value: &Value) -> Result<i32, DomainError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Null => return Err(DomainError::invalid(field, "cannot be null")),
        _ => None,
    };
    let v = parsed.ok_or_else(|| DomainError::invalid(field, "must be an integer"))?;
    if v < 0 {
        return Err(DomainError::invalid(field, "cannot be negative"));
    }
    i32::try_from(v).map_err(|_| DomainError::invalid(field, "is too large"))
}

/// Accepts RFC 3339 (converted to UTC), `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS[.f]` and bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn timestamp(field: &str, value: &Value) -> Result<NaiveDateTime, DomainError> {
    let raw = non_empty(field, value)?;
    parse_timestamp(&raw).ok_or_else(|| DomainError::invalid(field, "must be a valid date"))
}

/// Boolean or literal 0/1/"0"/"1", normalized to 0/1.
pub fn flag(field: &str, value: &Value) -> Result<i16, DomainError> {
    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 0.0 => Some(false),
            Some(v) if v == 1.0 => Some(true),
            _ => None,
        },
        Value::String(s) if s == "0" => Some(false),
        Value::String(s) if s == "1" => Some(true),
        Value::Null => return Err(DomainError::invalid(field, "cannot be null")),
        _ => None,
    };
    parsed
        .map(i16::from)
        .ok_or_else(|| DomainError::invalid(field, "must be boolean or 0/1"))
}
