//! Whole-record validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shield_model::{FormSpec, InputRecord};
use tracing::debug;

use crate::rules::{ValidationError, validate_field};

/// Field name to error mapping; empty map means the record is clean.
///
/// Always recomputed from the current record in one pass, never patched
/// field-by-field, so it can never go stale against the record.
pub type ErrorMap = BTreeMap<String, ValidationError>;

/// Outcome of a full validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revalidation {
    /// Per-field errors keyed by declared field name.
    pub errors: ErrorMap,
    /// True iff the error map is empty.
    pub submittable: bool,
}

/// Run the field validator over a form's declared field set.
///
/// Iterates declared fields only; transient record keys can neither produce
/// errors nor satisfy a required field. A required field with no declared
/// class still gets a presence error when missing, so an empty error map
/// always means the record is submittable. Synchronous and total - callers
/// run it on every field change and once more inside `submit()`.
#[must_use]
pub fn revalidate(form: &FormSpec, record: &InputRecord) -> Revalidation {
    let mut errors = ErrorMap::new();

    for def in &form.fields {
        let value = record.get(&def.name);
        if let Some(error) = validate_field(def, value) {
            errors.insert(def.name.clone(), error);
        } else if def.required && value.is_none() {
            errors.insert(
                def.name.clone(),
                ValidationError {
                    field: def.name.clone(),
                    message: "This field is required".to_string(),
                },
            );
        }
    }

    let submittable = errors.is_empty();
    if !submittable {
        debug!(
            form = %form.name,
            error_count = errors.len(),
            "record not submittable"
        );
    }

    Revalidation {
        errors,
        submittable,
    }
}
