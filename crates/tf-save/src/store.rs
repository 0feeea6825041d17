//! The save-store trait.

use chrono::Utc;
use tf_core::PlayerState;

use crate::error::SaveResult;
use crate::record::{SaveRecord, SlotSummary, sort_summaries, validate_slot_name};

/// A key-value store of player-state snapshots.
///
/// Implementors provide raw record access; saving, loading and listing are
/// built on top. A failed call never affects the caller's in-memory state.
pub trait SaveStore {
    /// Write a record, replacing any existing record in the same slot.
    fn put(&mut self, record: SaveRecord) -> SaveResult<()>;

    /// Read the record in `slot`, if any.
    fn get(&self, slot: &str) -> SaveResult<Option<SaveRecord>>;

    /// Every stored record, in no particular order.
    fn records(&self) -> SaveResult<Vec<SaveRecord>>;

    /// Remove a slot. Returns whether it existed.
    fn delete(&mut self, slot: &str) -> SaveResult<bool>;

    /// Snapshot `state` into `slot`, timestamped now.
    fn save(&mut self, slot: &str, state: &PlayerState) -> SaveResult<SlotSummary> {
        validate_slot_name(slot)?;
        let record = SaveRecord::new(slot, state, Utc::now());
        let summary = record.summary();
        self.put(record)?;
        tracing::info!(%slot, score = summary.score, level = summary.level, "game saved");
        Ok(summary)
    }

    /// The snapshot in `slot`, if any.
    fn load(&self, slot: &str) -> SaveResult<Option<PlayerState>> {
        let state = self.get(slot)?.map(|record| record.state);
        tracing::debug!(%slot, found = state.is_some(), "load requested");
        Ok(state)
    }

    /// Slot summaries, most recently saved first.
    fn list_slots(&self) -> SaveResult<Vec<SlotSummary>> {
        let mut summaries: Vec<SlotSummary> =
            self.records()?.iter().map(SaveRecord::summary).collect();
        sort_summaries(&mut summaries);
        Ok(summaries)
    }
}
