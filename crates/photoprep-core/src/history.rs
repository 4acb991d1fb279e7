//! Per-slot memory of committed edits.
//!
//! Entries are keyed by `(item_key, slot)` and live in a map owned by one
//! session, so sessions for different items never see each other's edits.
//! A miss is the normal case for untouched slots and means "identity".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{FilterState, TransformState};

/// Last committed values for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub filters: FilterState,
    pub transform: TransformState,
    /// Commit time, milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HistoryKey {
    item_key: String,
    slot: usize,
}

/// Session-scoped map from `(item_key, slot)` to the last commit.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    entries: HashMap<HistoryKey, HistoryEntry>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the last commit for a slot.
    pub fn get(&self, item_key: &str, slot: usize) -> Option<&HistoryEntry> {
        self.entries.get(&HistoryKey {
            item_key: item_key.to_owned(),
            slot,
        })
    }

    /// Values to show when visiting a slot: the last commit, or identity.
    pub fn load(&self, item_key: &str, slot: usize) -> (FilterState, TransformState) {
        self.get(item_key, slot)
            .map(|e| (e.filters, e.transform))
            .unwrap_or_default()
    }

    /// Record a commit, stamping it with the current time.
    pub fn set(
        &mut self,
        item_key: &str,
        slot: usize,
        filters: FilterState,
        transform: TransformState,
    ) {
        let entry = HistoryEntry {
            filters,
            transform,
            timestamp_ms: now_ms(),
        };
        self.entries.insert(
            HistoryKey {
                item_key: item_key.to_owned(),
                slot,
            },
            entry,
        );
    }

    /// Forget a slot's commit. Returns the removed entry, if any.
    pub fn delete(&mut self, item_key: &str, slot: usize) -> Option<HistoryEntry> {
        self.entries.remove(&HistoryKey {
            item_key: item_key.to_owned(),
            slot,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for one item, sorted by slot.
    pub fn entries_for(&self, item_key: &str) -> Vec<(usize, HistoryEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .filter(|(k, _)| k.item_key == item_key)
            .map(|(k, e)| (k.slot, *e))
            .collect();
        entries.sort_by_key(|(slot, _)| *slot);
        entries
    }
}

fn now_ms() -> u64 {
    // web-time keeps this working under wasm32
    web_time::SystemTime::now()
        .duration_since(web_time::SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
