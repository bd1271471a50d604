//! Rendering smoke tests.

use shield_cli::render::verdict_banner;
use shield_model::{AnalysisResult, Verdict};

fn result_with(verdict: Verdict) -> AnalysisResult {
    AnalysisResult {
        verdict,
        confidence: Some(0.5),
        method: "Keyword Analysis".to_string(),
        evidence_text: String::new(),
        structured_fields: Vec::new(),
        raw_keywords: Vec::new(),
    }
}

#[test]
fn banner_names_each_verdict() {
    assert!(verdict_banner(&result_with(Verdict::Fraudulent)).contains("FRAUDULENT"));
    assert!(verdict_banner(&result_with(Verdict::Legitimate)).contains("LEGITIMATE"));
    assert!(verdict_banner(&result_with(Verdict::Unknown)).contains("UNVERIFIED"));
}
