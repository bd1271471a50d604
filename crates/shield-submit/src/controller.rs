//! The single-flight submission controller.
//!
//! One controller instance drives one form. The phase field doubles as the
//! mutex: a `submit()` while a request is in flight is refused with a busy
//! outcome rather than cancelling the prior request. Refusal over
//! cancel-and-replace is a product decision - cancellation would leave
//! result attribution ambiguous - and is the normative behavior here.
//!
//! Dispatch is fire-and-forget on a worker thread; the thread reports back
//! over a channel and the owning caller applies completions from `poll()`.
//! `reset()` disowns in-flight work instead of aborting it: each dispatch
//! carries a ticket minted from the record snapshot it was built from, and
//! a completion whose ticket is no longer owned is discarded.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use tracing::{debug, info, warn};

use shield_model::{AnalysisResult, FormSpec, InputRecord};
use shield_validate::{ErrorMap, revalidate};

use crate::error::SubmitError;
use crate::interpret::interpret;
use crate::transport::{Payload, RawResponse, Transport, TransportError};

/// Position in the request lifecycle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionPhase {
    /// No submission prepared or outstanding.
    Idle,
    /// Synchronous validation pass in progress.
    Validating,
    /// Exactly one request dispatched and awaiting its response.
    InFlight,
    /// Last submission produced an analysis result.
    Succeeded,
    /// Last submission failed; retry is an explicit new `submit()`.
    Failed,
}

/// Outcome of a `submit()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record failed validation; no transport call was made.
    Rejected,
    /// A request is already in flight; no second call was dispatched.
    Busy,
    /// The snapshot was dispatched under this ticket.
    Dispatched(RequestTicket),
}

/// Tag identifying one dispatched request.
///
/// Stands in for the record snapshot the request was built from: a
/// completion is applied only while its ticket is still owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

/// Completion report sent back from a dispatch thread.
type Completion = (RequestTicket, Result<RawResponse, TransportError>);

/// Owns the single-flight invariant and the phase state machine for one form.
pub struct SubmissionController {
    form: FormSpec,
    endpoint: String,
    transport: Arc<dyn Transport>,
    phase: SubmissionPhase,
    /// Ticket of the dispatch whose completion we will still apply.
    owned: Option<RequestTicket>,
    next_ticket: u64,
    errors: ErrorMap,
    result: Option<AnalysisResult>,
    failure: Option<String>,
    completions_tx: Sender<Completion>,
    completions_rx: Receiver<Completion>,
}

impl SubmissionController {
    /// Create a controller for one form against one endpoint.
    pub fn new(form: FormSpec, endpoint: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let (completions_tx, completions_rx) = channel();
        Self {
            form,
            endpoint: endpoint.into(),
            transport,
            phase: SubmissionPhase::Idle,
            owned: None,
            next_ticket: 0,
            errors: ErrorMap::new(),
            result: None,
            failure: None,
            completions_tx,
            completions_rx,
        }
    }

    /// Current position in the request lifecycle.
    #[must_use]
    pub fn current_phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Per-field errors from the last validation pass.
    #[must_use]
    pub fn field_errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The last successful analysis result, if any.
    #[must_use]
    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Human-readable reason for the last failure, if any.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Validate the record and, if clean, dispatch exactly one request.
    ///
    /// While a request is in flight every further `submit()` returns
    /// [`SubmitOutcome::Busy`] without touching the transport.
    pub fn submit(&mut self, record: &InputRecord) -> SubmitOutcome {
        if self.phase == SubmissionPhase::InFlight {
            warn!(form = %self.form.name, "submission refused: request in flight");
            return SubmitOutcome::Busy;
        }

        // Mandatory revalidation immediately before dispatch; the UI's own
        // pass may be stale.
        self.phase = SubmissionPhase::Validating;
        let outcome = revalidate(&self.form, record);
        self.errors = outcome.errors;
        if !outcome.submittable {
            debug!(
                form = %self.form.name,
                errors = self.errors.len(),
                "submission rejected by validation"
            );
            self.phase = SubmissionPhase::Idle;
            return SubmitOutcome::Rejected;
        }

        // Prior result is for a prior record; drop it before dispatch.
        self.result = None;
        self.failure = None;

        let ticket = self.mint_ticket();
        let payload = Payload::from_record(&self.form, record);
        let transport = Arc::clone(&self.transport);
        let endpoint = self.endpoint.clone();
        let completions = self.completions_tx.clone();

        thread::spawn(move || {
            let response = transport.post(&endpoint, &payload);
            // The owner may have been dropped; a dead channel means the
            // response is disowned anyway.
            let _ = completions.send((ticket, response));
        });

        self.owned = Some(ticket);
        self.phase = SubmissionPhase::InFlight;
        info!(form = %self.form.name, ticket = ticket.0, "request dispatched");
        SubmitOutcome::Dispatched(ticket)
    }

    /// Apply any completed dispatches.
    ///
    /// Completions whose ticket is no longer owned (the controller was
    /// reset while they were in flight) are discarded without touching
    /// phase or result. Returns `true` when the phase advanced.
    pub fn poll(&mut self) -> bool {
        let mut advanced = false;
        while let Ok((ticket, response)) = self.completions_rx.try_recv() {
            if self.owned != Some(ticket) {
                debug!(ticket = ticket.0, "discarding stale response");
                continue;
            }
            self.owned = None;
            self.apply(response);
            advanced = true;
        }
        advanced
    }

    /// Return to `Idle`, clearing errors, result, and failure reason.
    ///
    /// Does not abort in-flight work; any response still outstanding is
    /// disowned and will be discarded by `poll()`.
    pub fn reset(&mut self) {
        if self.owned.is_some() {
            debug!(form = %self.form.name, "reset while in flight: response disowned");
        }
        self.owned = None;
        self.phase = SubmissionPhase::Idle;
        self.errors.clear();
        self.result = None;
        self.failure = None;
    }

    fn apply(&mut self, response: Result<RawResponse, TransportError>) {
        match response.map_err(SubmitError::from).and_then(|raw| {
            interpret(&raw.body).map_err(SubmitError::from)
        }) {
            Ok(result) => {
                info!(form = %self.form.name, verdict = result.verdict.label(), "analysis succeeded");
                self.result = Some(result);
                self.phase = SubmissionPhase::Succeeded;
            }
            Err(error) => {
                warn!(form = %self.form.name, %error, "analysis failed");
                // No partial result is ever exposed.
                self.result = None;
                self.failure = Some(error.user_message());
                self.phase = SubmissionPhase::Failed;
            }
        }
    }

    fn mint_ticket(&mut self) -> RequestTicket {
        self.next_ticket += 1;
        RequestTicket(self.next_ticket)
    }
}
