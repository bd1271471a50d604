//! Command implementations.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use shield_cli::{logging, render};
use shield_model::{BinaryRef, FieldValue, FormSpec, InputRecord};
use shield_session::{SessionMemory, SlotMapping, Web3FormsRelay, record_feedback};
use shield_session::feedback::DEFAULT_RELAY_ENDPOINT;
use shield_submit::{
    AnalysisEndpoints, HttpTransport, SubmissionController, SubmissionPhase, SubmitOutcome,
};

use crate::cli::{DashboardArgs, FeedbackArgs, MessageArgs, TransactionArgs};

/// Tiles on the dashboard, in default slot order.
const DASHBOARD_TILES: &[&str] = &[
    "message-fraud",
    "transaction-fraud",
    "lessons",
    "feedback",
    "activity",
    "stats",
];

/// How often the in-flight spinner polls the controller.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_message(args: &MessageArgs) -> Result<i32> {
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("failed to read {}", args.image.display()))?;
    let file_name = args
        .image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screenshot".to_string());
    let media_type = media_type_for(&args.image);

    let mut record = InputRecord::new();
    record.set(
        "screenshot",
        FieldValue::Binary(BinaryRef {
            file_name,
            media_type,
            bytes,
        }),
    );

    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| AnalysisEndpoints::default().message_analyze);
    run_submission(FormSpec::message_fraud(), endpoint, &record, "Analyzing screenshot...")
}

pub fn run_transaction(args: &TransactionArgs) -> Result<i32> {
    let mut record = InputRecord::new();
    record
        .set("transaction_type", args.transaction_type.as_str())
        .set("amount", args.amount.as_str())
        .set("current_balance", args.balance.as_str());

    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| AnalysisEndpoints::default().transaction_predict);
    run_submission(
        FormSpec::transaction_fraud(),
        endpoint,
        &record,
        "Analyzing transaction...",
    )
}

/// Drive one record through the submission workflow and render the outcome.
fn run_submission(
    form: FormSpec,
    endpoint: String,
    record: &InputRecord,
    spinner_message: &'static str,
) -> Result<i32> {
    let transport = Arc::new(HttpTransport::new().context("failed to build HTTP client")?);
    let mut controller = SubmissionController::new(form, endpoint, transport);

    match controller.submit(record) {
        SubmitOutcome::Rejected => {
            render::print_field_errors(controller.field_errors());
            return Ok(1);
        }
        SubmitOutcome::Busy => unreachable!("fresh controller cannot be in flight"),
        SubmitOutcome::Dispatched(ticket) => {
            debug!(?ticket, "request dispatched");
        }
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid spinner template"),
    );
    spinner.set_message(spinner_message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    while controller.current_phase() == SubmissionPhase::InFlight {
        if !controller.poll() {
            std::thread::sleep(POLL_INTERVAL);
        }
    }
    spinner.finish_and_clear();

    match controller.current_phase() {
        SubmissionPhase::Succeeded => {
            let result = controller.last_result().expect("succeeded phase has result");
            // Extracted text is user content; it only appears in logs
            // verbatim when --log-data is passed.
            debug!(
                evidence = logging::redact_value(&result.evidence_text),
                "analysis evidence"
            );
            render::print_result(result);
            Ok(0)
        }
        SubmissionPhase::Failed => {
            let reason = controller
                .failure_reason()
                .unwrap_or("Failed to analyze. Please try again.");
            render::print_failure(reason);
            Ok(1)
        }
        phase => unreachable!("settled submission cannot be {phase:?}"),
    }
}

pub fn run_feedback(args: &FeedbackArgs) -> Result<i32> {
    let access_key = args
        .access_key
        .clone()
        .or_else(|| std::env::var("WEB3FORMS_ACCESS_KEY").ok())
        .unwrap_or_default();
    let endpoint = args
        .relay_endpoint
        .clone()
        .unwrap_or_else(|| DEFAULT_RELAY_ENDPOINT.to_string());

    let relay = match Web3FormsRelay::new(endpoint, access_key) {
        Ok(relay) => relay,
        Err(error) => {
            render::print_failure(&error.to_string());
            return Ok(1);
        }
    };

    let mut record = InputRecord::new();
    record
        .set("name", args.name.as_str())
        .set("email", args.email.as_str())
        .set("category", args.category.as_str())
        .set("message", args.message.as_str());

    let mut memory = SessionMemory::default();
    match record_feedback(&mut memory, &relay, &record) {
        Ok(_) => {
            println!("Feedback sent. Thank you!");
            render::print_feedback_stats(&memory.feedback.stats());
            Ok(0)
        }
        Err(shield_session::RelayError::NotSubmittable { errors }) => {
            render::print_field_errors(&errors);
            Ok(1)
        }
        Err(error) => {
            render::print_failure(&error.to_string());
            Ok(1)
        }
    }
}

pub fn run_dashboard(args: &DashboardArgs) -> Result<i32> {
    let mut mapping = SlotMapping::new(DASHBOARD_TILES);
    for gesture in &args.swap {
        let (a, b) = gesture
            .split_once(':')
            .with_context(|| format!("invalid swap gesture '{gesture}', expected A:B"))?;
        mapping.swap(a.trim(), b.trim());
    }
    render::print_dashboard(&mapping.project(DASHBOARD_TILES));
    Ok(0)
}

/// Media type from the file extension; unknown extensions fall through to a
/// non-image type and fail validation with the proper message.
fn media_type_for(path: &std::path::Path) -> String {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("png") => "image/png".to_string(),
        Some("jpg" | "jpeg") => "image/jpeg".to_string(),
        Some("gif") => "image/gif".to_string(),
        Some("webp") => "image/webp".to_string(),
        Some("bmp") => "image/bmp".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}
