//! Shared data model for the ParentShield analysis client.
//!
//! This crate defines the types every other crate speaks in:
//!
//! - **Fields and records** (`field`, `record`): raw form input as typed
//!   field values, grouped into an [`InputRecord`]
//! - **Form specs** (`form`): the declared field set of each form, with
//!   per-field validation classes and required flags
//! - **Analysis results** (`analysis`): the canonical post-interpretation
//!   result model ([`AnalysisResult`], [`Verdict`], [`RiskLevel`])

pub mod analysis;
pub mod field;
pub mod form;
pub mod record;

pub use analysis::{AnalysisResult, NOT_DETECTED, RiskLevel, Verdict};
pub use field::{BinaryRef, FieldClass, FieldValue};
pub use form::{FieldDef, FormSpec};
pub use record::InputRecord;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_buckets() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Minimal);
        assert_eq!(RiskLevel::from_score(19.9), RiskLevel::Minimal);
        assert_eq!(RiskLevel::from_score(20.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(80.0), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100.0), RiskLevel::Critical);
    }

    #[test]
    fn analysis_result_serializes() {
        let result = AnalysisResult {
            verdict: Verdict::Fraudulent,
            confidence: Some(0.92),
            method: "Keyword Analysis".to_string(),
            evidence_text: "URGENT: verify your account".to_string(),
            structured_fields: vec![("amount".to_string(), NOT_DETECTED.to_string())],
            raw_keywords: vec!["urgent".to_string(), "verify".to_string()],
        };
        let json = serde_json::to_string(&result).expect("serialize result");
        let round: AnalysisResult = serde_json::from_str(&json).expect("deserialize result");
        assert_eq!(round.verdict, Verdict::Fraudulent);
        assert_eq!(round.raw_keywords.len(), 2);
    }
}
