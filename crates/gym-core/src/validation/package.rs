//! Package rule set. Name uniqueness is checked by the package service.

use serde_json::Value;

use super::{collect, integer, number, optional_text, rules, text, whitelist_create, Payload};
use crate::domain::{NewPackage, PackageField};
use crate::error::DomainError;
use crate::update::{Column, FieldSet, FieldValue};

const REQUIRED: &[PackageField] = &[
    PackageField::PackageName,
    PackageField::Price,
    PackageField::DurationDays,
];

pub fn check_field(field: PackageField, value: &Value) -> Result<FieldValue, DomainError> {
    let key = field.key();
    match field {
        PackageField::PackageName => Ok(FieldValue::text(rules::non_empty(key, value)?)),
        PackageField::Price => Ok(FieldValue::Number(rules::non_negative_number(key, value)?)),
        PackageField::DurationDays => {
            Ok(FieldValue::Integer(Some(rules::non_negative_integer(key, value)?)))
        }
        PackageField::Description => Ok(FieldValue::Text(rules::nullable_non_empty(key, value)?)),
    }
}

pub fn check_update(entries: &[(PackageField, &Value)]) -> Result<FieldSet<PackageField>, DomainError> {
    collect(entries, check_field)
}

pub fn check_create(payload: &Payload) -> Result<NewPackage, DomainError> {
    let entries = whitelist_create(payload, REQUIRED)?;
    let fields = collect(&entries, check_field)?;

    Ok(NewPackage {
        package_name: text(&fields, PackageField::PackageName)?,
        price: number(&fields, PackageField::Price)?,
        duration_days: integer(&fields, PackageField::DurationDays)?,
        description: optional_text(&fields, PackageField::Description),
    })
}
