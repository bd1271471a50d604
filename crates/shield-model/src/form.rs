//! Declared field sets for the product's forms.

use serde::{Deserialize, Serialize};

use crate::field::FieldClass;

/// A single declared field: name, validation class, and required flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as it appears in the input record and wire payload.
    pub name: String,
    /// Validation class; `None` means pass-through (always valid).
    pub class: Option<FieldClass>,
    /// Whether the field must be present for the record to be submittable.
    pub required: bool,
}

impl FieldDef {
    /// A required field with the given validation class.
    #[must_use]
    pub fn required(name: &str, class: FieldClass) -> Self {
        Self {
            name: name.to_string(),
            class: Some(class),
            required: true,
        }
    }

    /// An optional field with no validation rule.
    #[must_use]
    pub fn passthrough(name: &str) -> Self {
        Self {
            name: name.to_string(),
            class: None,
            required: false,
        }
    }
}

/// The declared field set of one form.
///
/// Validation iterates this set, never the raw record keys, so transient
/// record entries cannot produce errors or satisfy required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    /// Form name, used in log output.
    pub name: String,
    /// Declared fields in display order.
    pub fields: Vec<FieldDef>,
}

impl FormSpec {
    /// The message-fraud form: a single required screenshot upload.
    #[must_use]
    pub fn message_fraud() -> Self {
        Self {
            name: "message-fraud".to_string(),
            fields: vec![FieldDef::required("screenshot", FieldClass::ImageUpload)],
        }
    }

    /// The transaction-fraud form: type plus two monetary fields.
    #[must_use]
    pub fn transaction_fraud() -> Self {
        Self {
            name: "transaction-fraud".to_string(),
            fields: vec![
                FieldDef {
                    name: "transaction_type".to_string(),
                    class: None,
                    required: true,
                },
                FieldDef::required("amount", FieldClass::Monetary),
                FieldDef::required("current_balance", FieldClass::Monetary),
            ],
        }
    }

    /// The feedback form: name, email, category, and message.
    #[must_use]
    pub fn feedback() -> Self {
        Self {
            name: "feedback".to_string(),
            fields: vec![
                FieldDef::required("name", FieldClass::Identity),
                FieldDef::required("email", FieldClass::Email),
                FieldDef::passthrough("category"),
                FieldDef::required("message", FieldClass::FreeText),
            ],
        }
    }

    /// Look up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}
