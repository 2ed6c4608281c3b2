//! User rule set
//!
//! A submitted `password` leaves this module already hashed; the plaintext
//! never reaches the update planner or the store.

use gym_security::PasswordService;
use gym_shared::constants::MIN_PASSWORD_LENGTH;
use gym_shared::{Role, UserStatus};
use serde_json::Value;

use super::{collect, optional_text, rules, text, whitelist_create, Payload};
use crate::domain::{NewUser, UserField};
use crate::error::DomainError;
use crate::update::{Column, FieldSet, FieldValue};

const REQUIRED: &[UserField] = &[UserField::Username, UserField::Password, UserField::FullName];

pub fn check_field(field: UserField, value: &Value) -> Result<FieldValue, DomainError> {
    let key = field.key();
    match field {
        UserField::Username => {
            let raw = rules::string(key, value)?;
            let trimmed = raw.trim();
            if raw.contains(' ') || !rules::USERNAME.is_match(trimmed) {
                return Err(DomainError::invalid(
                    key,
                    "must contain only letters, numbers, dots, underscores, or hyphens (no spaces)",
                ));
            }
            Ok(FieldValue::text(trimmed))
        }
        UserField::Password => {
            let raw = rules::string(key, value)?;
            if raw.trim().chars().count() < MIN_PASSWORD_LENGTH {
                return Err(DomainError::invalid(
                    key,
                    format!("must be at least {} characters long", MIN_PASSWORD_LENGTH),
                ));
            }
            let hash = PasswordService::hash(raw)
                .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
            Ok(FieldValue::text(hash))
        }
        UserField::FullName => {
            let raw = rules::string(key, value)?;
            if !rules::FULL_NAME.is_match(raw) {
                return Err(DomainError::invalid(
                    key,
                    "must contain only English letters separated by single spaces",
                ));
            }
            Ok(FieldValue::text(raw))
        }
        UserField::Role => {
            let role = Role::parse(rules::string(key, value)?.trim())
                .ok_or_else(|| DomainError::invalid(key, "must be one of admin, staff"))?;
            Ok(FieldValue::text(role.as_str()))
        }
        UserField::Status => {
            let status = UserStatus::parse(rules::string(key, value)?.trim())
                .ok_or_else(|| DomainError::invalid(key, "must be one of active, inactive"))?;
            Ok(FieldValue::text(status.as_str()))
        }
    }
}

pub fn check_update(entries: &[(UserField, &Value)]) -> Result<FieldSet<UserField>, DomainError> {
    collect(entries, check_field)
}

pub fn check_create(payload: &Payload) -> Result<NewUser, DomainError> {
    let entries = whitelist_create(payload, REQUIRED)?;
    let fields = collect(&entries, check_field)?;

    Ok(NewUser {
        username: text(&fields, UserField::Username)?,
        password_hash: text(&fields, UserField::Password)?,
        full_name: text(&fields, UserField::FullName)?,
        role: optional_text(&fields, UserField::Role)
            .and_then(|r| Role::parse(&r))
            .unwrap_or_default(),
        status: optional_text(&fields, UserField::Status)
            .and_then(|s| UserStatus::parse(&s))
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::whitelist;
    use serde_json::json;

    fn update(body: Value) -> Result<FieldSet<UserField>, DomainError> {
        let payload = body.as_object().cloned().unwrap();
        let entries = whitelist::<UserField>(&payload)?;
        check_update(&entries)
    }

    #[test]
    fn username_pattern() {
        assert!(update(json!({"username": "alice.b-2_x"})).is_ok());
        assert!(update(json!({"username": "alice b"})).is_err());
        assert!(update(json!({"username": " alice"})).is_err());
        assert!(update(json!({"username": "alice!"})).is_err());
        assert!(update(json!({"username": ""})).is_err());
    }

    #[test]
    fn password_is_replaced_by_hash() {
        let fields = update(json!({"password": "secret1"})).unwrap();
        let stored = fields.get(UserField::Password).and_then(FieldValue::as_text).unwrap();
        assert_ne!(stored, "secret1");
        assert!(PasswordService::verify("secret1", stored).unwrap());
        assert!(!PasswordService::verify("secret2", stored).unwrap());
        assert_eq!(UserField::Password.column(), "password_hash");
    }

    #[test]
    fn short_or_blank_password_is_rejected() {
        assert!(update(json!({"password": "12345"})).is_err());
        assert!(update(json!({"password": "          "})).is_err());
        assert!(update(json!({"password": "  12345  "})).is_err());
    }

    #[test]
    fn full_name_rules() {
        assert!(update(json!({"full_name": "Alice Smith"})).is_ok());
        assert!(update(json!({"full_name": " Alice"})).is_err());
        assert!(update(json!({"full_name": "Alice  Smith"})).is_err());
        assert!(update(json!({"full_name": "Alice9"})).is_err());
    }

    #[test]
    fn role_and_status_are_closed_sets() {
        assert!(update(json!({"role": "admin", "status": "inactive"})).is_ok());
        assert_eq!(
            update(json!({"role": "owner"})).unwrap_err().to_string(),
            "invalid role: must be one of admin, staff"
        );
        assert!(update(json!({"status": "banned"})).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = update(json!({"full_name": "Alice", "is_superuser": true})).unwrap_err();
        assert_eq!(err.to_string(), "invalid field is_superuser");
    }

    #[test]
    fn create_defaults_role_and_status() {
        let payload = json!({"username": "bob", "password": "pa55word", "full_name": "Bob Stone"});
        let user = check_create(payload.as_object().unwrap()).unwrap();
        assert_eq!(user.role, Role::Staff);
        assert_eq!(user.status, UserStatus::Active);
        assert_ne!(user.password_hash, "pa55word");
    }
}
