//! The consumed tile-layout boundary.
//!
//! The dashboard's drag-and-rearrange grid is an opaque utility from this
//! system's point of view: it assigns item identifiers to slot identifiers
//! and preserves that assignment under swap gestures. This module is the
//! boundary contract, not a layout algorithm.

use serde::{Deserialize, Serialize};

/// Item-to-slot assignment for a set of dashboard tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotMapping {
    /// `(slot, item)` pairs in slot order.
    slots: Vec<(String, String)>,
}

impl SlotMapping {
    /// Assign each item a slot in the order given.
    #[must_use]
    pub fn new(items: &[&str]) -> Self {
        let slots = items
            .iter()
            .enumerate()
            .map(|(index, item)| (format!("slot-{index}"), (*item).to_string()))
            .collect();
        Self { slots }
    }

    /// Exchange the slots of two items. Unknown items are ignored.
    pub fn swap(&mut self, a: &str, b: &str) {
        let pos_a = self.slots.iter().position(|(_, item)| item == a);
        let pos_b = self.slots.iter().position(|(_, item)| item == b);
        if let (Some(pos_a), Some(pos_b)) = (pos_a, pos_b) {
            let item_a = self.slots[pos_a].1.clone();
            self.slots[pos_a].1 = self.slots[pos_b].1.clone();
            self.slots[pos_b].1 = item_a;
        }
    }

    /// Project the current items onto slots, preserving the mapping.
    ///
    /// Known items keep their slots; items the mapping has not seen get
    /// fresh slots appended; items no longer present are dropped.
    #[must_use]
    pub fn project(&self, items: &[&str]) -> Vec<(String, String)> {
        let mut projected: Vec<(String, String)> = self
            .slots
            .iter()
            .filter(|(_, item)| items.contains(&item.as_str()))
            .cloned()
            .collect();
        let mut next_index = self.slots.len();
        for item in items {
            if !projected.iter().any(|(_, known)| known == item) {
                projected.push((format!("slot-{next_index}"), (*item).to_string()));
                next_index += 1;
            }
        }
        projected
    }

    /// The slot assigned to an item, if known.
    #[must_use]
    pub fn slot_of(&self, item: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|(_, known)| known == item)
            .map(|(slot, _)| slot.as_str())
    }
}
