//! Process-lifetime session state.
//!
//! Everything in this crate lives and dies with the process; nothing is
//! ever written to durable storage. That is a design decision, not an
//! oversight: bookmarks, read markers, and the feedback log are explicitly
//! ephemeral.
//!
//! - **Memory** (`memory`): bookmark set, read markers, and the append-only
//!   feedback log with its stats view
//! - **Feedback** (`feedback`): the relay boundary and the deliver-then-
//!   append recording workflow
//! - **Layout** (`layout`): the opaque tile-to-slot mapping consumed by the
//!   dashboard

pub mod feedback;
pub mod layout;
pub mod memory;

pub use feedback::{
    FeedbackCategory, FeedbackRelay, FeedbackSubmission, RelayError, Web3FormsRelay,
    record_feedback,
};
pub use layout::SlotMapping;
pub use memory::{BookmarkSet, FeedbackEntry, FeedbackLog, FeedbackStats, ReadMarkerSet, SessionMemory};
