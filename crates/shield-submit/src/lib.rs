//! Submission workflow engine.
//!
//! One generic engine replaces the per-page copies of the same workflow:
//! collect input, validate it, dispatch exactly one in-flight request,
//! normalize whatever shape the backend answers with, and drive the UI
//! through a small set of phases.
//!
//! - **Transport** (`transport`): the consumed HTTP boundary - a single
//!   `POST(endpoint, payload)` operation behind the [`Transport`] trait,
//!   with a blocking `reqwest` implementation
//! - **Controller** (`controller`): the [`SubmissionController`] phase
//!   state machine owning the single-flight invariant and stale-response
//!   discard
//! - **Interpreter** (`interpret`): shape dispatch from raw payloads to the
//!   canonical [`shield_model::AnalysisResult`]
//! - **Config** (`config`): analysis endpoint defaults and overrides
//!
//! # Error Handling
//!
//! All failures funnel into [`SubmitError`], built with `thiserror`. A
//! failed submission never exposes a partial result; retry is an explicit
//! new `submit()` call, never automatic.

pub mod config;
pub mod controller;
pub mod error;
pub mod interpret;
pub mod transport;

pub use config::AnalysisEndpoints;
pub use controller::{RequestTicket, SubmissionController, SubmissionPhase, SubmitOutcome};
pub use error::{Result, SubmitError};
pub use interpret::{InterpretError, interpret};
pub use transport::{HttpTransport, Payload, RawResponse, Transport, TransportError};
