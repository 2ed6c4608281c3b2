//! Member rule set

use chrono::NaiveDateTime;
use serde_json::Value;

use super::{collect, integer, optional_text, rules, text, whitelist_create, Payload};
use crate::domain::{Member, MemberField, NewMember};
use crate::error::DomainError;
use crate::update::{Column, FieldSet, FieldValue};

const REQUIRED: &[MemberField] = &[
    MemberField::FirstName,
    MemberField::LastName,
    MemberField::PackageId,
    MemberField::StartDate,
];

pub fn check_field(field: MemberField, value: &Value) -> Result<FieldValue, DomainError> {
    let key = field.key();
    match field {
        MemberField::FirstName | MemberField::LastName => {
            let name = rules::non_empty(key, value)?;
            if !rules::PERSON_NAME.is_match(&name) {
                return Err(DomainError::invalid(key, "must contain only letters and spaces"));
            }
            Ok(FieldValue::text(name))
        }
        MemberField::PhoneNumber => match rules::nullable_non_empty(key, value)? {
            None => Ok(FieldValue::Text(None)),
            Some(phone) if rules::PHONE_NUMBER.is_match(&phone) => Ok(FieldValue::text(phone)),
            Some(_) => Err(DomainError::invalid(key, "must contain exactly 10 digits")),
        },
        MemberField::PackageId => Ok(FieldValue::Integer(Some(rules::entity_id(key, value)?))),
        MemberField::StartDate => Ok(FieldValue::Timestamp(Some(rules::timestamp(key, value)?))),
        MemberField::ExpiryDate => {
            if value.is_null() {
                return Ok(FieldValue::Timestamp(None));
            }
            Ok(FieldValue::Timestamp(Some(rules::timestamp(key, value)?)))
        }
        MemberField::PhotoUrl => match rules::nullable_non_empty(key, value)? {
            None => Ok(FieldValue::Text(None)),
            Some(url) if rules::HTTP_URL.is_match(&url) => Ok(FieldValue::text(url)),
            Some(_) => Err(DomainError::invalid(key, "must be a valid http/https URL")),
        },
        MemberField::IsActive => Ok(FieldValue::SmallInt(rules::flag(key, value)?)),
    }
}

/// Validates a partial update against the stored row. Date ordering uses the
/// stored value for whichever side was not submitted.
pub fn check_update(
    entries: &[(MemberField, &Value)],
    stored: &Member,
) -> Result<FieldSet<MemberField>, DomainError> {
    let fields = collect(entries, check_field)?;

    let start = submitted_date(&fields, MemberField::StartDate).unwrap_or(Some(stored.start_date));
    let expiry = submitted_date(&fields, MemberField::ExpiryDate).unwrap_or(stored.expiry_date);
    check_date_order(start, expiry)?;

    Ok(fields)
}

/// Builds a new member. An omitted or null `is_active` defaults to active.
pub fn check_create(payload: &Payload) -> Result<NewMember, DomainError> {
    let mut entries = whitelist_create(payload, REQUIRED)?;
    entries.retain(|(field, value)| !(*field == MemberField::IsActive && value.is_null()));
    let fields = collect(&entries, check_field)?;

    let start_date = submitted_date(&fields, MemberField::StartDate)
        .flatten()
        .ok_or_else(|| DomainError::MissingField(MemberField::StartDate.key().to_string()))?;
    let expiry_date = submitted_date(&fields, MemberField::ExpiryDate).flatten();
    check_date_order(Some(start_date), expiry_date)?;

    Ok(NewMember {
        first_name: text(&fields, MemberField::FirstName)?,
        last_name: text(&fields, MemberField::LastName)?,
        phone_number: optional_text(&fields, MemberField::PhoneNumber),
        package_id: integer(&fields, MemberField::PackageId)?,
        start_date,
        expiry_date,
        photo_url: optional_text(&fields, MemberField::PhotoUrl),
        is_active: fields
            .get(MemberField::IsActive)
            .and_then(FieldValue::as_small_int)
            .unwrap_or(1),
    })
}

fn submitted_date(fields: &FieldSet<MemberField>, field: MemberField) -> Option<Option<NaiveDateTime>> {
    fields.get(field).and_then(FieldValue::as_timestamp)
}

fn check_date_order(
    start: Option<NaiveDateTime>,
    expiry: Option<NaiveDateTime>,
) -> Result<(), DomainError> {
    if let (Some(start), Some(expiry)) = (start, expiry) {
        if expiry < start {
            return Err(DomainError::invalid(
                MemberField::ExpiryDate.key(),
                "cannot be before start date",
            ));
        }
    }
    Ok(())
}
