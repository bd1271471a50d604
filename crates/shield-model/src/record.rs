//! The mutable input record backing an active form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::{BinaryRef, FieldValue};

/// Field name to raw value mapping for the active form instance.
///
/// Owned exclusively by the form driving it; replaced wholesale on reset.
/// May carry transient keys the form spec does not declare; the validation
/// aggregator iterates the declared field set, not record keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl InputRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any prior value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text content of a field, if present and textual.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Numeric content of a field, if present and parseable.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    /// Binary payload of a field, if present and binary.
    #[must_use]
    pub fn binary(&self, name: &str) -> Option<&BinaryRef> {
        self.get(name).and_then(FieldValue::as_binary)
    }

    /// Whether the record carries a binary payload in any field.
    #[must_use]
    pub fn has_binary(&self) -> bool {
        self.fields
            .values()
            .any(|v| matches!(v, FieldValue::Binary(_)))
    }

    /// Iterate over all `(name, value)` pairs, transient keys included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields present, transient keys included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_parses_as_number() {
        let mut record = InputRecord::new();
        record.set("amount", "1250.50");
        assert_eq!(record.number("amount"), Some(1250.50));
    }

    #[test]
    fn set_replaces_prior_value() {
        let mut record = InputRecord::new();
        record.set("name", "Alice").set("name", "Bob");
        assert_eq!(record.text("name"), Some("Bob"));
        assert_eq!(record.len(), 1);
    }
}
