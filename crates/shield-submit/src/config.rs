//! Analysis endpoint configuration.

use serde::{Deserialize, Serialize};

/// Default message analysis endpoint (screenshot OCR + keyword/ML scoring).
pub const DEFAULT_MESSAGE_ENDPOINT: &str = "http://localhost:5000/api/analyze";

/// Default transaction prediction endpoint.
pub const DEFAULT_TRANSACTION_ENDPOINT: &str = "http://localhost:8000/predict";

/// The two analysis endpoints the product talks to.
///
/// Each backend may evolve its response shape independently; the result
/// interpreter handles the dispatch, so endpoints here are just URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisEndpoints {
    /// Message-fraud analysis endpoint (multipart screenshot upload).
    pub message_analyze: String,
    /// Transaction-fraud prediction endpoint (JSON fields).
    pub transaction_predict: String,
}

impl Default for AnalysisEndpoints {
    fn default() -> Self {
        Self {
            message_analyze: DEFAULT_MESSAGE_ENDPOINT.to_string(),
            transaction_predict: DEFAULT_TRANSACTION_ENDPOINT.to_string(),
        }
    }
}
