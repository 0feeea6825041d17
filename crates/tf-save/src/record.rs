//! Save records and slot summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tf_core::PlayerState;

use crate::error::{SaveError, SaveResult};

const MAX_SLOT_NAME_LEN: usize = 64;

/// A persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    /// Slot name.
    pub slot: String,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// The snapshot, without in-game save slots.
    pub state: PlayerState,
}

impl SaveRecord {
    /// Snapshot `state` into `slot`.
    pub fn new(slot: impl Into<String>, state: &PlayerState, saved_at: DateTime<Utc>) -> Self {
        Self {
            slot: slot.into(),
            saved_at,
            state: state.snapshot(),
        }
    }

    /// The listing entry for this record.
    pub fn summary(&self) -> SlotSummary {
        SlotSummary {
            name: self.slot.clone(),
            score: self.state.score,
            level: self.state.level,
            scene: self.state.current_scene.clone(),
            saved_at: self.saved_at,
        }
    }
}

/// One line of a slot listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    /// Slot name.
    pub name: String,
    /// Score at save time.
    pub score: i32,
    /// Level at save time.
    pub level: i32,
    /// Scene at save time.
    pub scene: String,
    /// When the slot was written.
    pub saved_at: DateTime<Utc>,
}

/// Check a slot name.
///
/// Names double as file stems, so only ASCII letters, digits, `-` and `_`
/// are accepted.
pub fn validate_slot_name(slot: &str) -> SaveResult<()> {
    let valid = !slot.is_empty()
        && slot.len() <= MAX_SLOT_NAME_LEN
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SaveError::InvalidSlotName(slot.to_string()))
    }
}

/// Newest first; equal timestamps by name.
pub(crate) fn sort_summaries(summaries: &mut [SlotSummary]) {
    summaries.sort_by(|a, b| {
        b.saved_at
            .cmp(&a.saved_at)
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tf_core::Operation;

    #[test]
    fn slot_names() {
        assert!(validate_slot_name("autosave").is_ok());
        assert!(validate_slot_name("chapter-2_b").is_ok());
        assert!(validate_slot_name("").is_err());
        assert!(validate_slot_name("../etc").is_err());
        assert!(validate_slot_name("with space").is_err());
        assert!(validate_slot_name(&"x".repeat(65)).is_err());
    }

    #[test]
    fn record_drops_nested_slots() {
        let state = tf_core::apply(
            &PlayerState::initial(),
            &Operation::SaveGame {
                slot: "inner".to_string(),
            },
        );
        assert_eq!(state.save_slots.len(), 1);

        let record = SaveRecord::new("outer", &state, Utc::now());
        assert!(record.state.save_slots.is_empty());
        assert_eq!(record.state.score, state.score);
    }

    #[test]
    fn summaries_newest_first() {
        let at = |h| Utc.with_ymd_and_hms(2026, 3, 1, h, 0, 0).unwrap();
        let state = PlayerState::initial();
        let mut summaries = vec![
            SaveRecord::new("b", &state, at(9)).summary(),
            SaveRecord::new("c", &state, at(12)).summary(),
            SaveRecord::new("a", &state, at(9)).summary(),
        ];
        sort_summaries(&mut summaries);
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
