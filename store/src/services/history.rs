//! Bounded consumption history
//!
//! Most-recent-first log of stock mutations backing single-level undo and
//! the recent-activity display.

use shared::models::ConsumptionEntry;

/// Maximum number of history entries retained.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Capped, most-recent-first mutation log
#[derive(Debug, Default)]
pub struct ConsumptionHistory {
    entries: Vec<ConsumptionEntry>,
}

impl ConsumptionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the history from a persisted snapshot, re-applying the cap.
    pub fn from_entries(mut entries: Vec<ConsumptionEntry>) -> Self {
        entries.truncate(MAX_HISTORY_ENTRIES);
        Self { entries }
    }

    /// Prepend an entry, silently dropping the oldest once the cap is hit.
    pub fn record(&mut self, entry: ConsumptionEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    /// All entries, most recent first.
    pub fn entries(&self) -> &[ConsumptionEntry] {
        &self.entries
    }

    /// The most recent entries affecting one lot, up to `limit`.
    pub fn for_lot(&self, lot_id: u32, limit: usize) -> Vec<&ConsumptionEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.lot_id == lot_id)
            .take(limit)
            .collect()
    }

    /// Remove and return the most recent entry.
    pub fn pop_latest(&mut self) -> Option<ConsumptionEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
