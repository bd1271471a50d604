//! The consumed transport boundary: one `POST(endpoint, payload)` operation.

use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use shield_model::{FieldValue, FormSpec, InputRecord};

/// HTTP request timeout for the production transport.
///
/// The controller itself imposes no timeout; bounded latency comes from the
/// transport layer.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the transport boundary. All retryable by resubmission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// Connection, DNS, or timeout failure.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("analysis request failed ({status}): {message}")]
    NonSuccess {
        /// HTTP status code.
        status: u16,
        /// Backend error message, or a generic fallback.
        message: String,
    },

    /// The response body was not valid JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// Wire payload snapshot built from an input record at dispatch time.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON-encoded form fields.
    Json(Value),
    /// Multipart binary upload (screenshot analysis).
    Multipart {
        /// Form part name the backend expects.
        field_name: String,
        /// Original file name.
        file_name: String,
        /// Declared media type.
        media_type: String,
        /// Raw payload bytes.
        bytes: Vec<u8>,
    },
}

impl Payload {
    /// Snapshot a record into its wire form.
    ///
    /// Projects through the form's declared field set, so transient record
    /// keys never reach the wire. A declared binary field becomes a
    /// multipart upload of that field; otherwise the declared fields that
    /// are present encode into one JSON object.
    #[must_use]
    pub fn from_record(form: &FormSpec, record: &InputRecord) -> Self {
        for def in &form.fields {
            if let Some(FieldValue::Binary(binary)) = record.get(&def.name) {
                return Self::Multipart {
                    field_name: def.name.clone(),
                    file_name: binary.file_name.clone(),
                    media_type: binary.media_type.clone(),
                    bytes: binary.bytes.clone(),
                };
            }
        }

        let mut object = Map::new();
        for def in &form.fields {
            let Some(value) = record.get(&def.name) else {
                continue;
            };
            let json = match value {
                FieldValue::Text(s) => {
                    // Numeric text goes over the wire as a number, matching
                    // what the prediction backend expects.
                    match value.as_number().and_then(serde_json::Number::from_f64) {
                        Some(n) => Value::Number(n),
                        None => Value::String(s.clone()),
                    }
                }
                FieldValue::Number(n) => {
                    Value::Number(serde_json::Number::from_f64(*n).unwrap_or(0.into()))
                }
                FieldValue::Binary(_) => unreachable!("binary handled above"),
            };
            object.insert(def.name.clone(), json);
        }
        Self::Json(Value::Object(object))
    }
}

/// Raw transport response: status plus parsed JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed response body.
    pub body: Value,
}

/// The single consumed transport operation.
///
/// Implementations must be shareable with the dispatch thread; the core
/// does not care whether the payload travels as JSON or multipart, only
/// that a JSON body and a status come back.
pub trait Transport: Send + Sync {
    /// POST a payload to an endpoint and return the parsed response.
    fn post(&self, endpoint: &str, payload: &Payload) -> Result<RawResponse, TransportError>;
}

/// Production transport over blocking `reqwest`.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build the transport with the standard request timeout.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post(&self, endpoint: &str, payload: &Payload) -> Result<RawResponse, TransportError> {
        debug!(endpoint, "dispatching analysis request");

        let request = self.client.post(endpoint);
        let response = match payload {
            Payload::Json(body) => request.json(body).send(),
            Payload::Multipart {
                field_name,
                file_name,
                media_type,
                bytes,
            } => {
                let part = reqwest::blocking::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(media_type)
                    .map_err(|e| TransportError::Network(e.to_string()))?;
                let form =
                    reqwest::blocking::multipart::Form::new().part(field_name.clone(), part);
                request.multipart(form).send()
            }
        }
        .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| TransportError::MalformedBody(e.to_string()))?;

        if !status.is_success() {
            // Surface the backend's own error message when it carries one.
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Failed to analyze. Please try again.")
                .to_string();
            return Err(TransportError::NonSuccess {
                status: status.as_u16(),
                message,
            });
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shield_model::BinaryRef;

    #[test]
    fn record_with_binary_becomes_multipart() {
        let mut record = InputRecord::new();
        record.set(
            "screenshot",
            FieldValue::Binary(BinaryRef {
                file_name: "shot.png".to_string(),
                media_type: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            }),
        );
        match Payload::from_record(&FormSpec::message_fraud(), &record) {
            Payload::Multipart {
                field_name,
                file_name,
                ..
            } => {
                assert_eq!(field_name, "screenshot");
                assert_eq!(file_name, "shot.png");
            }
            Payload::Json(_) => panic!("expected multipart"),
        }
    }

    #[test]
    fn text_fields_become_json_with_numbers_parsed() {
        let mut record = InputRecord::new();
        record
            .set("transaction_type", "PAYMENT")
            .set("amount", "1250.50")
            .set("current_balance", FieldValue::Number(90000.0));
        match Payload::from_record(&FormSpec::transaction_fraud(), &record) {
            Payload::Json(body) => {
                assert_eq!(body["transaction_type"], "PAYMENT");
                assert_eq!(body["amount"], 1250.50);
                assert_eq!(body["current_balance"], 90000.0);
            }
            Payload::Multipart { .. } => panic!("expected json"),
        }
    }

    #[test]
    fn transient_record_keys_never_reach_the_wire() {
        let mut record = InputRecord::new();
        record
            .set("transaction_type", "PAYMENT")
            .set("amount", "100")
            .set("current_balance", "5000")
            .set("draft_note", "session-local scratch value");
        match Payload::from_record(&FormSpec::transaction_fraud(), &record) {
            Payload::Json(body) => {
                let object = body.as_object().expect("json object");
                assert!(!object.contains_key("draft_note"));
                assert_eq!(object.len(), 3);
            }
            Payload::Multipart { .. } => panic!("expected json"),
        }
    }
}
