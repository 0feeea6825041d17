//! In-memory save store.

use std::collections::BTreeMap;

use crate::error::SaveResult;
use crate::record::{SaveRecord, validate_slot_name};
use crate::store::SaveStore;

/// Slots held in memory for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<String, SaveRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots are stored.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SaveStore for MemoryStore {
    fn put(&mut self, record: SaveRecord) -> SaveResult<()> {
        validate_slot_name(&record.slot)?;
        self.slots.insert(record.slot.clone(), record);
        Ok(())
    }

    fn get(&self, slot: &str) -> SaveResult<Option<SaveRecord>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn records(&self) -> SaveResult<Vec<SaveRecord>> {
        Ok(self.slots.values().cloned().collect())
    }

    fn delete(&mut self, slot: &str) -> SaveResult<bool> {
        Ok(self.slots.remove(slot).is_some())
    }
}
