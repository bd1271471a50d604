//! Feedback delivery through the external form relay.
//!
//! The relay is the source of truth: the in-memory log entry is appended
//! only after the relay confirms acceptance, so a locally-logged entry the
//! relay never saw cannot silently pass for success.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use shield_model::{FormSpec, InputRecord};
use shield_validate::{ErrorMap, revalidate};

use crate::memory::SessionMemory;

/// Placeholder credential shipped in templates; treated as unconfigured.
const PLACEHOLDER_ACCESS_KEY: &str = "YOUR_ACCESS_KEY_HERE";

/// Default relay endpoint.
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Relay request timeout.
const RELAY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Feedback category, as offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    /// General suggestion.
    Suggestion,
    /// Bug report.
    Bug,
    /// Feature request.
    Feature,
    /// Improvement to an existing feature.
    Improvement,
    /// Complaint.
    Complaint,
}

impl FeedbackCategory {
    /// Parse a category from its form value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "suggestion" => Some(Self::Suggestion),
            "bug" => Some(Self::Bug),
            "feature" => Some(Self::Feature),
            "improvement" => Some(Self::Improvement),
            "complaint" => Some(Self::Complaint),
            _ => None,
        }
    }

    /// Form value / display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Suggestion => "suggestion",
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Improvement => "improvement",
            Self::Complaint => "complaint",
        }
    }
}

/// Errors from the feedback workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RelayError {
    /// The access key is absent or still the template placeholder.
    /// Operator error; surfaced distinctly from transient failures.
    #[error("feedback relay is not configured: {reason}")]
    Configuration {
        /// What is missing.
        reason: String,
    },

    /// The form failed validation; nothing was sent.
    #[error("feedback failed validation ({} field error(s))", errors.len())]
    NotSubmittable {
        /// Per-field validation errors.
        errors: ErrorMap,
    },

    /// Network failure reaching the relay.
    #[error("failed to reach feedback relay: {0}")]
    Network(String),

    /// The relay answered but refused the submission.
    #[error("feedback relay rejected the submission: {message}")]
    Rejected {
        /// Relay-provided message, or a generic fallback.
        message: String,
    },
}

/// A validated feedback submission ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    /// Submitter name, trimmed.
    pub name: String,
    /// Submitter email, trimmed and lowercased.
    pub email: String,
    /// Chosen category.
    pub category: FeedbackCategory,
    /// Message text, trimmed.
    pub message: String,
}

impl FeedbackSubmission {
    /// Build a submission from a validated feedback record.
    ///
    /// Returns the error map when the record does not pass the feedback
    /// form's rules; an unknown category falls back to `Suggestion` (the
    /// form default).
    pub fn from_record(record: &InputRecord) -> Result<Self, RelayError> {
        let form = FormSpec::feedback();
        let outcome = revalidate(&form, record);
        if !outcome.submittable {
            return Err(RelayError::NotSubmittable {
                errors: outcome.errors,
            });
        }
        let category = record
            .text("category")
            .and_then(FeedbackCategory::parse)
            .unwrap_or(FeedbackCategory::Suggestion);
        Ok(Self {
            name: record.text("name").unwrap_or_default().trim().to_string(),
            email: record
                .text("email")
                .unwrap_or_default()
                .trim()
                .to_lowercase(),
            category,
            message: record
                .text("message")
                .unwrap_or_default()
                .trim()
                .to_string(),
        })
    }
}

/// The consumed relay boundary: one JSON POST, `{success, message?}` back.
pub trait FeedbackRelay {
    /// Deliver a submission; `Ok(())` means the relay accepted it.
    fn deliver(&self, submission: &FeedbackSubmission) -> Result<(), RelayError>;
}

/// Relay response body.
#[derive(Debug, Deserialize)]
struct RelayResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Production relay client against the Web3Forms endpoint.
pub struct Web3FormsRelay {
    endpoint: String,
    access_key: String,
    client: reqwest::blocking::Client,
}

impl Web3FormsRelay {
    /// Build a relay client.
    ///
    /// Fails fast with a configuration error when the access key is empty
    /// or still the template placeholder, so operators see the real cause
    /// instead of a generic transport failure.
    pub fn new(endpoint: impl Into<String>, access_key: impl Into<String>) -> Result<Self, RelayError> {
        let access_key = access_key.into();
        if access_key.trim().is_empty() {
            return Err(RelayError::Configuration {
                reason: "access key is empty".to_string(),
            });
        }
        if access_key == PLACEHOLDER_ACCESS_KEY {
            return Err(RelayError::Configuration {
                reason: "access key is still the template placeholder".to_string(),
            });
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(RELAY_TIMEOUT)
            .build()
            .map_err(|e| RelayError::Network(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            access_key,
            client,
        })
    }
}

impl FeedbackRelay for Web3FormsRelay {
    fn deliver(&self, submission: &FeedbackSubmission) -> Result<(), RelayError> {
        debug!(endpoint = %self.endpoint, "delivering feedback");

        let body = json!({
            "access_key": self.access_key,
            "name": submission.name,
            "email": submission.email,
            "category": submission.category.label(),
            "message": submission.message,
            "submission_date": Utc::now().to_rfc3339(),
            "subject": format!("New Feedback from {} - ParentShield.AI", submission.name),
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| RelayError::Network(e.to_string()))?;

        let parsed: RelayResponse = response
            .json()
            .map_err(|e| RelayError::Network(e.to_string()))?;

        if parsed.success {
            Ok(())
        } else {
            Err(RelayError::Rejected {
                message: parsed
                    .message
                    .unwrap_or_else(|| "Failed to send feedback".to_string()),
            })
        }
    }
}

/// Validate, deliver, and record one piece of feedback.
///
/// The log entry is appended only after the relay confirms acceptance;
/// on any failure the log is untouched.
pub fn record_feedback(
    memory: &mut SessionMemory,
    relay: &dyn FeedbackRelay,
    record: &InputRecord,
) -> Result<u64, RelayError> {
    let submission = FeedbackSubmission::from_record(record)?;

    if let Err(error) = relay.deliver(&submission) {
        warn!(%error, "feedback delivery failed; log untouched");
        return Err(error);
    }

    let entry = memory.feedback.append(
        submission.name,
        submission.email,
        submission.category,
        submission.message,
    );
    info!(id = entry.id, "feedback delivered and logged");
    Ok(entry.id)
}
