//! Unified error types for the submission workflow.

use thiserror::Error;

use crate::interpret::InterpretError;
use crate::transport::TransportError;

/// Result alias for submission operations.
pub type Result<T> = std::result::Result<T, SubmitError>;

/// Unified error type for the submission workflow.
///
/// The taxonomy mirrors how each failure is recovered from: validation
/// failures by user edit, transport failures by resubmission, interpretation
/// failures by a backend fix, configuration failures by an operator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// The record failed validation; per-field errors never reach transport.
    #[error("record failed validation ({error_count} field error(s))")]
    NotSubmittable {
        /// Number of fields carrying errors.
        error_count: usize,
    },

    /// A request is already in flight; concurrent submission is refused.
    #[error("a submission is already in flight")]
    Busy,

    /// Network failure, timeout, or non-success status. Retryable.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered with a payload shape we do not recognize.
    #[error(transparent)]
    Interpretation(#[from] InterpretError),

    /// The feedback relay credential is absent or still the placeholder.
    /// Operator error, not a transient failure.
    #[error("relay access key is not configured: {reason}")]
    Configuration {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl SubmitError {
    /// User-facing failure message.
    ///
    /// Interpretation failures collapse to a generic message; the raw
    /// payload is never shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotSubmittable { .. } => "Please fix the errors above".to_string(),
            Self::Busy => "An analysis is already running".to_string(),
            Self::Transport(e) => e.to_string(),
            Self::Interpretation(_) => "Failed to analyze. Please try again.".to_string(),
            Self::Configuration { reason } => format!("Relay is not configured: {reason}"),
        }
    }
}
