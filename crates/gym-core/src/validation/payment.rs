//! Payment rule set

use gym_shared::EntityId;
use serde_json::Value;

use super::{collect, integer, number, rules, whitelist_create, Payload};
use crate::domain::{NewPayment, PaymentField};
use crate::error::DomainError;
use crate::update::{Column, FieldSet, FieldValue};

const REQUIRED: &[PaymentField] = &[PaymentField::MemberId, PaymentField::Amount];

pub fn check_field(field: PaymentField, value: &Value) -> Result<FieldValue, DomainError> {
    let key = field.key();
    match field {
        PaymentField::MemberId | PaymentField::StaffId => {
            Ok(FieldValue::Integer(Some(rules::entity_id(key, value)?)))
        }
        PaymentField::PackageId => {
            if value.is_null() {
                return Ok(FieldValue::Integer(None));
            }
            Ok(FieldValue::Integer(Some(rules::entity_id(key, value)?)))
        }
        PaymentField::Amount => Ok(FieldValue::Number(rules::positive_number(key, value)?)),
    }
}

pub fn check_update(entries: &[(PaymentField, &Value)]) -> Result<FieldSet<PaymentField>, DomainError> {
    collect(entries, check_field)
}

/// `recorded_by` is used as `staff_id` when the payload does not name one.
pub fn check_create(payload: &Payload, recorded_by: EntityId) -> Result<NewPayment, DomainError> {
    let entries = whitelist_create(payload, REQUIRED)?;
    let fields = collect(&entries, check_field)?;

    Ok(NewPayment {
        member_id: integer(&fields, PaymentField::MemberId)?,
        package_id: fields.get(PaymentField::PackageId).and_then(FieldValue::as_integer),
        amount: number(&fields, PaymentField::Amount)?,
        staff_id: fields
            .get(PaymentField::StaffId)
            .and_then(FieldValue::as_integer)
            .unwrap_or(recorded_by),
    })
}
