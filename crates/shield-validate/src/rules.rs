//! Per-field validation rules.
//!
//! Each rule is total and deterministic: any value, including the wrong
//! variant for the field class, yields a verdict rather than a panic.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use shield_model::{FieldClass, FieldDef, FieldValue};

/// Letters and whitespace only, for identity fields.
static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("invalid name regex"));

/// Standard `local@domain.tld` shape.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("invalid email regex")
});

/// Identity field length bounds (trimmed).
const NAME_LEN: (usize, usize) = (2, 50);

/// Free-text message length bounds (trimmed).
const MESSAGE_LEN: (usize, usize) = (10, 1000);

/// A single field's validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Declared field name.
    pub field: String,
    /// Human-readable reason, suitable for inline display.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate one declared field against its raw value.
///
/// Returns `None` when the value passes. Every class requires content, so a
/// missing or whitespace-only value fails any classed field; fields with no
/// declared class always pass.
#[must_use]
pub fn validate_field(def: &FieldDef, value: Option<&FieldValue>) -> Option<ValidationError> {
    let class = def.class?;
    match class {
        FieldClass::Identity => check_identity(&def.name, value),
        FieldClass::Email => check_email(&def.name, value),
        FieldClass::FreeText => check_free_text(&def.name, value),
        FieldClass::Monetary => check_monetary(&def.name, value),
        FieldClass::ImageUpload => check_image(&def.name, value),
    }
}

/// Trimmed text content; whitespace-only collapses to empty.
fn trimmed(value: Option<&FieldValue>) -> Option<&str> {
    let text = value?.as_text()?.trim();
    if text.is_empty() { None } else { Some(text) }
}

fn check_identity(field: &str, value: Option<&FieldValue>) -> Option<ValidationError> {
    let Some(text) = trimmed(value) else {
        return Some(ValidationError::new(field, "Name is required"));
    };
    let len = text.chars().count();
    if len < NAME_LEN.0 {
        return Some(ValidationError::new(
            field,
            format!("Name must be at least {} characters", NAME_LEN.0),
        ));
    }
    if len > NAME_LEN.1 {
        return Some(ValidationError::new(
            field,
            format!("Name cannot exceed {} characters", NAME_LEN.1),
        ));
    }
    if !NAME_REGEX.is_match(text) {
        return Some(ValidationError::new(
            field,
            "Name can only contain letters and spaces",
        ));
    }
    None
}

fn check_email(field: &str, value: Option<&FieldValue>) -> Option<ValidationError> {
    let Some(text) = trimmed(value) else {
        return Some(ValidationError::new(field, "Email is required"));
    };
    if !EMAIL_REGEX.is_match(text) {
        return Some(ValidationError::new(
            field,
            "Please enter a valid email address",
        ));
    }
    None
}

fn check_free_text(field: &str, value: Option<&FieldValue>) -> Option<ValidationError> {
    let Some(text) = trimmed(value) else {
        return Some(ValidationError::new(field, "Message is required"));
    };
    let len = text.chars().count();
    if len < MESSAGE_LEN.0 {
        return Some(ValidationError::new(
            field,
            format!("Message must be at least {} characters", MESSAGE_LEN.0),
        ));
    }
    if len > MESSAGE_LEN.1 {
        return Some(ValidationError::new(
            field,
            format!("Message cannot exceed {} characters", MESSAGE_LEN.1),
        ));
    }
    None
}

fn check_monetary(field: &str, value: Option<&FieldValue>) -> Option<ValidationError> {
    let Some(value) = value else {
        return Some(ValidationError::new(field, "Amount is required"));
    };
    match value.as_number() {
        Some(amount) if amount.is_finite() && amount >= 0.0 => None,
        Some(_) => Some(ValidationError::new(
            field,
            "Amount must be a non-negative number",
        )),
        None => Some(ValidationError::new(
            field,
            "Amount must be a valid number",
        )),
    }
}

fn check_image(field: &str, value: Option<&FieldValue>) -> Option<ValidationError> {
    let Some(value) = value else {
        return Some(ValidationError::new(field, "Please select an image file"));
    };
    match value.as_binary() {
        Some(binary) if binary.is_image() => None,
        _ => Some(ValidationError::new(
            field,
            "Please select a valid image file",
        )),
    }
}
