//! Field validation rules

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::schema::{FieldSchema, FieldType};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Why a field failed validation. The display text is the message shown
/// in the field's error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Este campo es obligatorio")]
    Required,
    #[error("Correo electrónico inválido")]
    InvalidEmail,
    #[error("El número debe tener 10 dígitos")]
    InvalidPhone,
}

/// Fails when the trimmed value is empty
pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Single-@ local/domain shape with a dotted domain, not full RFC validation
pub fn validate_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Exactly 10 ASCII digits
pub fn validate_phone(value: &str) -> bool {
    value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Check a field with the rule matching its kind.
///
/// Email and telephone fields use only their own rule (an empty value fails
/// it as well); every other field uses the required rule.
pub fn check_field(field: &FieldSchema, value: &str) -> Result<(), FieldError> {
    match field.field_type {
        FieldType::Email if !validate_email(value) => Err(FieldError::InvalidEmail),
        FieldType::Tel if !validate_phone(value) => Err(FieldError::InvalidPhone),
        FieldType::Email | FieldType::Tel => Ok(()),
        _ if !validate_required(value) => Err(FieldError::Required),
        _ => Ok(()),
    }
}
