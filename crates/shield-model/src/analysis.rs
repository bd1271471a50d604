//! Canonical post-interpretation analysis results.

use serde::{Deserialize, Serialize};

/// Marker used for structured fields the backend could not extract.
///
/// Absent or null detail fields are carried explicitly under this marker,
/// never omitted, so the rendered table always shows the full field set.
pub const NOT_DETECTED: &str = "not detected";

/// Fraud classification normalized from a backend response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Backend classified the input as fraudulent.
    Fraudulent,
    /// Backend classified the input as legitimate.
    Legitimate,
    /// No classification available.
    Unknown,
}

impl Verdict {
    /// Verdict from a boolean fraud flag.
    #[must_use]
    pub fn from_is_fraud(is_fraud: bool) -> Self {
        if is_fraud {
            Self::Fraudulent
        } else {
            Self::Legitimate
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fraudulent => "FRAUDULENT",
            Self::Legitimate => "LEGITIMATE",
            Self::Unknown => "UNVERIFIED",
        }
    }
}

/// Risk bucket derived from a 0-100 risk score.
///
/// Always re-derived from the score for display, never stored next to it,
/// so label and score cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Score below 20.
    Minimal,
    /// Score in [20, 40).
    Low,
    /// Score in [40, 60).
    Medium,
    /// Score in [60, 80).
    High,
    /// Score 80 and above.
    Critical,
}

impl RiskLevel {
    /// Bucket a 0-100 risk score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Critical
        } else if score >= 60.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Medium
        } else if score >= 20.0 {
            Self::Low
        } else {
            Self::Minimal
        }
    }

    /// Bucket a 0-1 confidence value (score scale divided by 100).
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        Self::from_score(confidence * 100.0)
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Minimal => "MINIMAL",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Canonical display model produced by the result interpreter.
///
/// Created only from a successful transport response; discarded when the
/// next submission starts or the controller is reset. Never partially
/// populated: interpretation either yields a complete result or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Normalized fraud classification.
    pub verdict: Verdict,
    /// Confidence in [0, 1], when the backend reported one.
    pub confidence: Option<f64>,
    /// Detection method label (e.g. "Keyword Analysis", "ML Model").
    pub method: String,
    /// Evidence text: OCR-extracted message text or backend reasoning.
    pub evidence_text: String,
    /// Extracted transaction details in backend order; absent sub-fields
    /// carry the [`NOT_DETECTED`] marker.
    pub structured_fields: Vec<(String, String)>,
    /// Matched suspicious keywords, possibly empty.
    pub raw_keywords: Vec<String>,
}

impl AnalysisResult {
    /// Risk bucket for display, derived from the confidence when present.
    #[must_use]
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.confidence.map(RiskLevel::from_confidence)
    }
}
