//! Tests for field rules and whole-record aggregation.

use shield_model::{BinaryRef, FieldClass, FieldDef, FieldValue, FormSpec, InputRecord};
use shield_validate::{revalidate, validate_field};

fn png(name: &str) -> FieldValue {
    FieldValue::Binary(BinaryRef {
        file_name: name.to_string(),
        media_type: "image/png".to_string(),
        bytes: vec![0x89, 0x50, 0x4E, 0x47],
    })
}

fn feedback_record() -> InputRecord {
    let mut record = InputRecord::new();
    record
        .set("name", "Jane Doe")
        .set("email", "jane@example.com")
        .set("category", "suggestion")
        .set("message", "The keyword analysis flagged a safe message.");
    record
}

// --- Field rule tests ---

#[test]
fn identity_accepts_letters_and_spaces() {
    let def = FieldDef::required("name", FieldClass::Identity);
    assert!(validate_field(&def, Some(&"Jane Doe".into())).is_none());
}

#[test]
fn identity_rejects_whitespace_only_as_empty() {
    let def = FieldDef::required("name", FieldClass::Identity);
    let error = validate_field(&def, Some(&"   ".into())).expect("whitespace-only is empty");
    assert_eq!(error.field, "name");
    assert!(error.message.contains("required"));
}

#[test]
fn identity_rejects_too_short_and_too_long() {
    let def = FieldDef::required("name", FieldClass::Identity);
    assert!(validate_field(&def, Some(&"J".into())).is_some());

    // Over-long input is reported as too long, never truncated.
    let long = "a".repeat(51);
    let error = validate_field(&def, Some(&FieldValue::from(long))).expect("too long");
    assert!(error.message.contains("exceed"));
}

#[test]
fn identity_rejects_digits() {
    let def = FieldDef::required("name", FieldClass::Identity);
    assert!(validate_field(&def, Some(&"Jane 2nd".into())).is_some());
}

#[test]
fn email_shape() {
    let def = FieldDef::required("email", FieldClass::Email);
    assert!(validate_field(&def, Some(&"user@example.com".into())).is_none());
    assert!(validate_field(&def, Some(&"user@example".into())).is_some());
    assert!(validate_field(&def, Some(&"not-an-email".into())).is_some());
    assert!(validate_field(&def, None).is_some());
}

#[test]
fn free_text_length_bounds() {
    let def = FieldDef::required("message", FieldClass::FreeText);
    assert!(validate_field(&def, Some(&"too short".into())).is_some());
    assert!(validate_field(&def, Some(&"long enough to be a real message".into())).is_none());
    let over = "x".repeat(1001);
    assert!(validate_field(&def, Some(&FieldValue::from(over))).is_some());
}

#[test]
fn monetary_accepts_numbers_and_numeric_text() {
    let def = FieldDef::required("amount", FieldClass::Monetary);
    assert!(validate_field(&def, Some(&FieldValue::Number(0.0))).is_none());
    assert!(validate_field(&def, Some(&"1250.50".into())).is_none());
    assert!(validate_field(&def, Some(&FieldValue::Number(-1.0))).is_some());
    assert!(validate_field(&def, Some(&FieldValue::Number(f64::NAN))).is_some());
    assert!(validate_field(&def, Some(&"12,50".into())).is_some());
}

#[test]
fn image_upload_requires_image_media_type() {
    let def = FieldDef::required("screenshot", FieldClass::ImageUpload);
    assert!(validate_field(&def, Some(&png("shot.png"))).is_none());

    let pdf = FieldValue::Binary(BinaryRef {
        file_name: "doc.pdf".to_string(),
        media_type: "application/pdf".to_string(),
        bytes: vec![0x25],
    });
    assert!(validate_field(&def, Some(&pdf)).is_some());
    assert!(validate_field(&def, None).is_some());
}

#[test]
fn undeclared_class_is_passthrough() {
    let def = FieldDef::passthrough("category");
    assert!(validate_field(&def, Some(&"anything at all".into())).is_none());
    assert!(validate_field(&def, None).is_none());
}

// --- Aggregation tests ---

#[test]
fn clean_record_is_submittable() {
    let outcome = revalidate(&FormSpec::feedback(), &feedback_record());
    assert!(outcome.errors.is_empty());
    assert!(outcome.submittable);
}

#[test]
fn single_bad_field_maps_to_exactly_that_field() {
    let mut record = feedback_record();
    record.set("email", "nope");
    let outcome = revalidate(&FormSpec::feedback(), &record);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors.contains_key("email"));
    assert!(!outcome.submittable);
}

#[test]
fn missing_required_field_blocks_submission() {
    let mut record = InputRecord::new();
    record.set("amount", "100").set("current_balance", "5000");
    // transaction_type is required but classless: presence is still enforced.
    let outcome = revalidate(&FormSpec::transaction_fraud(), &record);
    assert!(!outcome.submittable);
    let error = outcome
        .errors
        .get("transaction_type")
        .expect("missing required field reports an error");
    assert!(error.message.contains("required"));
}

#[test]
fn transient_record_keys_are_ignored() {
    let mut record = feedback_record();
    record.set("not_a_declared_field", "whatever");
    let outcome = revalidate(&FormSpec::feedback(), &record);
    assert!(outcome.submittable);
}

#[test]
fn revalidate_is_idempotent_on_unchanged_record() {
    let mut record = feedback_record();
    record.set("name", "X");
    let first = revalidate(&FormSpec::feedback(), &record);
    let second = revalidate(&FormSpec::feedback(), &record);
    assert_eq!(first, second);
}

#[test]
fn message_fraud_form_accepts_image() {
    let mut record = InputRecord::new();
    record.set("screenshot", png("shot.png"));
    assert!(revalidate(&FormSpec::message_fraud(), &record).submittable);
}

// --- Properties ---

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Two passes over the same record always agree.
        #[test]
        fn idempotent(name in ".{0,60}", email in ".{0,40}", message in ".{0,1100}") {
            let mut record = InputRecord::new();
            record
                .set("name", name)
                .set("email", email)
                .set("category", "suggestion")
                .set("message", message);
            let form = FormSpec::feedback();
            prop_assert_eq!(revalidate(&form, &record), revalidate(&form, &record));
        }

        /// Submittable and an empty error map always coincide.
        #[test]
        fn submittable_iff_no_errors(name in "[A-Za-z ]{2,50}", message in ".{0,1100}") {
            let mut record = InputRecord::new();
            record
                .set("name", name)
                .set("email", "user@example.com")
                .set("category", "bug")
                .set("message", message);
            let outcome = revalidate(&FormSpec::feedback(), &record);
            prop_assert_eq!(outcome.submittable, outcome.errors.is_empty());
        }

        /// Valid names never produce a name error.
        #[test]
        fn valid_identity_passes(name in "[A-Za-z]{2,50}") {
            let def = FieldDef::required("name", FieldClass::Identity);
            let value = FieldValue::from(name);
            prop_assert!(validate_field(&def, Some(&value)).is_none());
        }
    }
}
