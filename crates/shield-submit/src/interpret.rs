//! Result interpretation: shape dispatch over heterogeneous backend payloads.
//!
//! The analysis backends are not uniform and evolve independently, so the
//! interpreter recognizes each known payload shape by key presence and
//! normalizes it into one canonical [`AnalysisResult`]. An unrecognized
//! shape is an error, never a best-effort guess.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use shield_model::{AnalysisResult, NOT_DETECTED, Verdict};

/// Transaction detail keys the extraction backend reports, in its order.
const DETAIL_KEYS: &[&str] = &[
    "amount",
    "transaction_type",
    "recipient",
    "upi_id",
    "account_number",
    "transaction_id",
];

/// Interpretation failure: the payload matched no known shape.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InterpretError {
    /// No known shape matched the payload's keys.
    #[error("unrecognized analysis payload shape")]
    UnrecognizedShape,

    /// A shape was recognized but its fields did not deserialize.
    #[error("malformed {shape} payload: {message}")]
    MalformedShape {
        /// Which shape was being parsed.
        shape: &'static str,
        /// Deserialization failure detail.
        message: String,
    },
}

/// Keyword-method shape: `{fraud_analysis: {is_fraud, ...}, extracted_text}`.
#[derive(Debug, Deserialize)]
struct KeywordShape {
    fraud_analysis: KeywordAnalysis,
    #[serde(default)]
    extracted_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KeywordAnalysis {
    is_fraud: bool,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    matched_keywords: Option<Vec<String>>,
}

/// Structured-extraction shape: `{fraud_analysis: {verdict, reasoning},
/// transaction_details, extracted_text}`.
#[derive(Debug, Deserialize)]
struct StructuredShape {
    fraud_analysis: StructuredAnalysis,
    #[serde(default)]
    transaction_details: serde_json::Map<String, Value>,
    #[serde(default)]
    extracted_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StructuredAnalysis {
    verdict: String,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Direct-score shape: `{fraud: bool, risk_score: 0-100}`.
#[derive(Debug, Deserialize)]
struct DirectScoreShape {
    fraud: bool,
    risk_score: f64,
}

/// Normalize a raw backend payload into the canonical result model.
///
/// Shape dispatch keys on which recognized fields are present:
///
/// 1. `fraud_analysis.is_fraud` - keyword-method shape
/// 2. `fraud_analysis.verdict` - structured-extraction shape
/// 3. top-level `fraud` + `risk_score` - direct-score shape
pub fn interpret(payload: &Value) -> Result<AnalysisResult, InterpretError> {
    if let Some(analysis) = payload.get("fraud_analysis") {
        if analysis.get("is_fraud").is_some() {
            return interpret_keyword(payload);
        }
        if analysis.get("verdict").is_some() {
            return interpret_structured(payload);
        }
        return Err(InterpretError::UnrecognizedShape);
    }
    if payload.get("fraud").is_some() && payload.get("risk_score").is_some() {
        return interpret_direct_score(payload);
    }
    Err(InterpretError::UnrecognizedShape)
}

fn interpret_keyword(payload: &Value) -> Result<AnalysisResult, InterpretError> {
    let shape: KeywordShape = deserialize(payload, "keyword")?;
    debug!(is_fraud = shape.fraud_analysis.is_fraud, "keyword shape");

    Ok(AnalysisResult {
        verdict: Verdict::from_is_fraud(shape.fraud_analysis.is_fraud),
        confidence: shape.fraud_analysis.confidence,
        method: shape
            .fraud_analysis
            .method
            .unwrap_or_else(|| "Keyword Analysis".to_string()),
        evidence_text: shape.extracted_text.unwrap_or_default(),
        structured_fields: Vec::new(),
        raw_keywords: shape.fraud_analysis.matched_keywords.unwrap_or_default(),
    })
}

fn interpret_structured(payload: &Value) -> Result<AnalysisResult, InterpretError> {
    let shape: StructuredShape = deserialize(payload, "structured")?;
    debug!(verdict = %shape.fraud_analysis.verdict, "structured shape");

    // Literal "legitimate" clears; any other verdict string is fraud.
    let verdict = if shape.fraud_analysis.verdict == "legitimate" {
        Verdict::Legitimate
    } else {
        Verdict::Fraudulent
    };

    // Carry the full detail set, absent or null values as an explicit
    // marker rather than an omission. Known keys keep backend order;
    // unexpected extras follow.
    let mut structured_fields = Vec::new();
    for key in DETAIL_KEYS {
        structured_fields.push((
            (*key).to_string(),
            detail_value(shape.transaction_details.get(*key)),
        ));
    }
    for (key, value) in &shape.transaction_details {
        if !DETAIL_KEYS.contains(&key.as_str()) {
            structured_fields.push((key.clone(), detail_value(Some(value))));
        }
    }

    let evidence_text = shape
        .extracted_text
        .or(shape.fraud_analysis.reasoning)
        .unwrap_or_default();

    Ok(AnalysisResult {
        verdict,
        confidence: shape.fraud_analysis.confidence,
        method: "ML Model".to_string(),
        evidence_text,
        structured_fields,
        raw_keywords: Vec::new(),
    })
}

fn interpret_direct_score(payload: &Value) -> Result<AnalysisResult, InterpretError> {
    let shape: DirectScoreShape = deserialize(payload, "direct-score")?;
    debug!(fraud = shape.fraud, risk_score = shape.risk_score, "direct-score shape");

    Ok(AnalysisResult {
        verdict: Verdict::from_is_fraud(shape.fraud),
        // The risk label is never stored; it is re-derived from this
        // confidence wherever it is displayed.
        confidence: Some(shape.risk_score / 100.0),
        method: "Risk Score".to_string(),
        evidence_text: String::new(),
        structured_fields: Vec::new(),
        raw_keywords: Vec::new(),
    })
}

fn deserialize<'de, T: Deserialize<'de>>(
    payload: &'de Value,
    shape: &'static str,
) -> Result<T, InterpretError> {
    T::deserialize(payload).map_err(|e| InterpretError::MalformedShape {
        shape,
        message: e.to_string(),
    })
}

fn detail_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_DETECTED.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}
