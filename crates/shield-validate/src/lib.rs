//! Field validation rules and whole-record aggregation.
//!
//! Two layers, both pure and synchronous:
//!
//! - [`validate_field`] maps one declared field plus its raw value to at
//!   most one [`ValidationError`]
//! - [`revalidate`] runs the field validator over a form's declared field
//!   set and produces the [`ErrorMap`] plus the submittable flag
//!
//! Validation never suspends and never throws; an empty error map is the
//! single source of truth for "this record may be submitted".

mod aggregate;
mod rules;

pub use aggregate::{ErrorMap, Revalidation, revalidate};
pub use rules::{ValidationError, validate_field};
