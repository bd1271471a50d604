//! Session memory and feedback workflow tests.

use std::cell::RefCell;

use shield_model::InputRecord;
use shield_session::{
    BookmarkSet, FeedbackCategory, FeedbackRelay, FeedbackSubmission, ReadMarkerSet, RelayError,
    SessionMemory, Web3FormsRelay, record_feedback,
};

/// Relay double that records deliveries and answers from a script.
struct ScriptedRelay {
    accept: bool,
    delivered: RefCell<Vec<FeedbackSubmission>>,
}

impl ScriptedRelay {
    fn accepting() -> Self {
        Self {
            accept: true,
            delivered: RefCell::new(Vec::new()),
        }
    }

    fn refusing() -> Self {
        Self {
            accept: false,
            delivered: RefCell::new(Vec::new()),
        }
    }
}

impl FeedbackRelay for ScriptedRelay {
    fn deliver(&self, submission: &FeedbackSubmission) -> Result<(), RelayError> {
        self.delivered.borrow_mut().push(submission.clone());
        if self.accept {
            Ok(())
        } else {
            Err(RelayError::Rejected {
                message: "quota exceeded".to_string(),
            })
        }
    }
}

fn feedback_record() -> InputRecord {
    let mut record = InputRecord::new();
    record
        .set("name", "Jane Doe")
        .set("email", "Jane@Example.COM")
        .set("category", "bug")
        .set("message", "The transaction page mislabels the risk bucket.");
    record
}

// --- Bookmark and read-marker tests ---

#[test]
fn bookmark_toggle_is_its_own_inverse() {
    let mut bookmarks = BookmarkSet::default();
    bookmarks.toggle("tip-1");
    bookmarks.toggle("tip-2");
    bookmarks.toggle("tip-3");
    let snapshot = bookmarks.clone();

    assert!(!bookmarks.toggle("tip-2"));
    assert!(bookmarks.toggle("tip-2"));
    // Contents restored; tip-2 is now last, as a fresh bookmark would be.
    assert_eq!(bookmarks.len(), snapshot.len());
    assert!(bookmarks.contains("tip-2"));
    assert_eq!(bookmarks.iter().last(), Some("tip-2"));
}

#[test]
fn bookmark_toggle_twice_on_fresh_id_restores_contents_and_order() {
    let mut bookmarks = BookmarkSet::default();
    bookmarks.toggle("tip-1");
    bookmarks.toggle("tip-2");
    let before: Vec<_> = bookmarks.iter().map(str::to_string).collect();

    bookmarks.toggle("tip-9");
    bookmarks.toggle("tip-9");
    let after: Vec<_> = bookmarks.iter().map(str::to_string).collect();
    assert_eq!(before, after);
}

#[test]
fn read_markers_toggle() {
    let mut markers = ReadMarkerSet::default();
    assert!(markers.toggle("tip-4"));
    assert!(markers.is_read("tip-4"));
    assert!(!markers.toggle("tip-4"));
    assert!(!markers.is_read("tip-4"));
}

// --- Feedback workflow tests ---

#[test]
fn accepted_feedback_is_logged_after_delivery() {
    let mut memory = SessionMemory::default();
    let relay = ScriptedRelay::accepting();

    let id = record_feedback(&mut memory, &relay, &feedback_record()).expect("accepted");
    assert_eq!(id, 1);
    assert_eq!(memory.feedback.len(), 1);

    let entry = &memory.feedback.entries()[0];
    assert_eq!(entry.email, "jane@example.com");
    assert_eq!(entry.category, FeedbackCategory::Bug);

    let delivered = relay.delivered.borrow();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].email, "jane@example.com");
}

#[test]
fn relay_refusal_leaves_log_untouched() {
    let mut memory = SessionMemory::default();
    let relay = ScriptedRelay::refusing();

    let error = record_feedback(&mut memory, &relay, &feedback_record()).expect_err("refused");
    assert!(matches!(error, RelayError::Rejected { .. }));
    assert!(memory.feedback.is_empty());
}

#[test]
fn invalid_feedback_never_reaches_the_relay() {
    let mut memory = SessionMemory::default();
    let relay = ScriptedRelay::accepting();

    let mut record = feedback_record();
    record.set("email", "not-an-email");

    let error = record_feedback(&mut memory, &relay, &record).expect_err("invalid");
    match error {
        RelayError::NotSubmittable { errors } => assert!(errors.contains_key("email")),
        other => panic!("expected NotSubmittable, got {other:?}"),
    }
    assert!(relay.delivered.borrow().is_empty());
    assert!(memory.feedback.is_empty());
}

#[test]
fn feedback_stats_aggregate() {
    let mut memory = SessionMemory::default();
    let relay = ScriptedRelay::accepting();

    for (category, message) in [
        ("bug", "The dashboard spinner never stops on timeout."),
        ("bug", "Keyword chips overflow on narrow windows here."),
        ("suggestion", "Show the risk bucket next to the score."),
    ] {
        let mut record = feedback_record();
        record.set("category", category).set("message", message);
        record_feedback(&mut memory, &relay, &record).expect("accepted");
    }

    let stats = memory.feedback.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.categories.get("bug"), Some(&2));
    assert_eq!(stats.categories.get("suggestion"), Some(&1));
    // Newest first.
    assert_eq!(stats.recent[0].id, 3);
}

// --- Relay configuration tests ---

#[test]
fn placeholder_access_key_is_a_configuration_error() {
    let error = Web3FormsRelay::new("https://relay.test", "YOUR_ACCESS_KEY_HERE")
        .err()
        .expect("placeholder refused");
    assert!(matches!(error, RelayError::Configuration { .. }));
}

#[test]
fn empty_access_key_is_a_configuration_error() {
    let error = Web3FormsRelay::new("https://relay.test", "  ")
        .err()
        .expect("empty refused");
    assert!(matches!(error, RelayError::Configuration { .. }));
}
