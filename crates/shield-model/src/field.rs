//! Raw field values and validation classes.

use serde::{Deserialize, Serialize};

/// Reference to a binary payload attached to a form field (image upload).
///
/// Bytes are held in memory for the lifetime of the record; screenshots are
/// small and the record is replaced wholesale on reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryRef {
    /// Original file name, used as the multipart part file name.
    pub file_name: String,
    /// Declared media type (e.g. `image/png`).
    pub media_type: String,
    /// Raw payload bytes.
    pub bytes: Vec<u8>,
}

impl BinaryRef {
    /// Whether the payload declares an image media type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// A raw value as it arrives from a form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Free text, untrimmed.
    Text(String),
    /// Already-parsed numeric input.
    Number(f64),
    /// Binary payload reference (image upload).
    Binary(BinaryRef),
}

impl FieldValue {
    /// The text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content, accepting both parsed numbers and numeric text.
    ///
    /// Form inputs arrive as text, so monetary fields must parse either way.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Binary(_) => None,
        }
    }

    /// The binary payload, if this is a binary value.
    #[must_use]
    pub fn as_binary(&self) -> Option<&BinaryRef> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Validation class of a declared form field.
///
/// A field with no class is a pass-through: always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldClass {
    /// Person name: 2-50 characters, letters and whitespace only.
    Identity,
    /// Email address in `local@domain.tld` shape.
    Email,
    /// Free-text message: trimmed length 10-1000.
    FreeText,
    /// Non-negative finite amount.
    Monetary,
    /// Binary payload declaring an image media type.
    ImageUpload,
}

impl FieldClass {
    /// Human-readable label for error messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Identity => "name",
            Self::Email => "email address",
            Self::FreeText => "message",
            Self::Monetary => "amount",
            Self::ImageUpload => "image",
        }
    }
}
