//! In-memory session stores.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackCategory;

/// How many entries the stats view reports as recent.
const RECENT_LIMIT: usize = 5;

/// Insertion-ordered set of bookmarked item identifiers.
///
/// Order is display order: a re-added bookmark goes to the end, exactly as
/// if it had never been bookmarked before.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkSet {
    items: Vec<String>,
}

impl BookmarkSet {
    /// Toggle an identifier: insert if absent, remove if present.
    ///
    /// Returns `true` when the identifier is bookmarked after the call.
    /// Toggling the same identifier twice restores both contents and order.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(position) = self.items.iter().position(|item| item == id) {
            self.items.remove(position);
            false
        } else {
            self.items.push(id.to_string());
            true
        }
    }

    /// Remove an identifier outright.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|item| item != id);
    }

    /// Whether an identifier is bookmarked.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item == id)
    }

    /// Bookmarked identifiers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Number of bookmarks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no bookmarks exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Set of item identifiers the user has opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadMarkerSet {
    items: Vec<String>,
}

impl ReadMarkerSet {
    /// Toggle a read marker: set if absent, clear if present.
    ///
    /// Returns `true` when the identifier is marked read after the call.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(position) = self.items.iter().position(|item| item == id) {
            self.items.remove(position);
            false
        } else {
            self.items.push(id.to_string());
            true
        }
    }

    /// Whether an identifier is marked read.
    #[must_use]
    pub fn is_read(&self, id: &str) -> bool {
        self.items.iter().any(|item| item == id)
    }

    /// Number of read markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no markers exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One delivered feedback record. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    /// Monotonic identifier within this process.
    pub id: u64,
    /// Submitter name.
    pub name: String,
    /// Submitter email, lowercased.
    pub email: String,
    /// Feedback category.
    pub category: FeedbackCategory,
    /// Feedback message text.
    pub message: String,
    /// When the relay confirmed acceptance.
    pub submitted_at: DateTime<Utc>,
}

/// Aggregate view over the feedback log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    /// Total entries appended this process.
    pub total: usize,
    /// Entry count per category label.
    pub categories: HashMap<String, usize>,
    /// Newest entries first, at most five.
    pub recent: Vec<FeedbackEntry>,
}

/// Append-only log of delivered feedback.
///
/// Append is the only mutation; entries are never updated or deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackLog {
    entries: Vec<FeedbackEntry>,
    next_id: u64,
}

impl FeedbackLog {
    /// Append a confirmed feedback record, minting its identifier.
    pub fn append(
        &mut self,
        name: String,
        email: String,
        category: FeedbackCategory,
        message: String,
    ) -> &FeedbackEntry {
        self.next_id += 1;
        self.entries.push(FeedbackEntry {
            id: self.next_id,
            name,
            email,
            category,
            message,
            submitted_at: Utc::now(),
        });
        self.entries.last().expect("entry just appended")
    }

    /// All entries in append order.
    #[must_use]
    pub fn entries(&self) -> &[FeedbackEntry] {
        &self.entries
    }

    /// Aggregate stats: totals, per-category counts, recent entries.
    #[must_use]
    pub fn stats(&self) -> FeedbackStats {
        let mut categories: HashMap<String, usize> = HashMap::new();
        for entry in &self.entries {
            *categories
                .entry(entry.category.label().to_string())
                .or_default() += 1;
        }
        let recent = self
            .entries
            .iter()
            .rev()
            .take(RECENT_LIMIT)
            .cloned()
            .collect();
        FeedbackStats {
            total: self.entries.len(),
            categories,
            recent,
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no feedback has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All session-scoped state, passed explicitly to the components that use it.
#[derive(Debug, Clone, Default)]
pub struct SessionMemory {
    /// Bookmarked lesson identifiers.
    pub bookmarks: BookmarkSet,
    /// Lessons the user has opened.
    pub read_markers: ReadMarkerSet,
    /// Delivered feedback, newest last.
    pub feedback: FeedbackLog,
}
