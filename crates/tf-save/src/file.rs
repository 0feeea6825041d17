//! JSON-file save store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SaveError, SaveResult};
use crate::record::{SaveRecord, validate_slot_name};
use crate::store::SaveStore;

/// One pretty-printed `<slot>.json` file per slot in a directory.
///
/// The directory is created on the first save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store slots under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> SaveResult<PathBuf> {
        validate_slot_name(slot)?;
        Ok(self.dir.join(format!("{slot}.json")))
    }

    fn read(path: &Path) -> SaveResult<SaveRecord> {
        let json = fs::read_to_string(path).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SaveError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SaveStore for JsonFileStore {
    fn put(&mut self, record: SaveRecord) -> SaveResult<()> {
        let path = self.slot_path(&record.slot)?;
        fs::create_dir_all(&self.dir).map_err(|source| SaveError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let json = serde_json::to_string_pretty(&record).map_err(|source| SaveError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| SaveError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "save file written");
        Ok(())
    }

    fn get(&self, slot: &str) -> SaveResult<Option<SaveRecord>> {
        let path = self.slot_path(slot)?;
        if !path.is_file() {
            return Ok(None);
        }
        Self::read(&path).map(Some)
    }

    /// Unreadable or corrupt files are skipped with a warning.
    fn records(&self) -> SaveResult<Vec<SaveRecord>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir).map_err(|source| SaveError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut records = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read(&path) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable save file"),
            }
        }
        Ok(records)
    }

    fn delete(&mut self, slot: &str) -> SaveResult<bool> {
        let path = self.slot_path(slot)?;
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|source| SaveError::Io { path, source })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tf_core::{Operation, PlayerState, Reducer};

    fn played_state() -> PlayerState {
        let ops = [
            Operation::AddToInventory {
                item: "Ancient Key".to_string(),
            },
            Operation::AddAchievement {
                name: "Keen Observer".to_string(),
            },
            Operation::ModifyRelationship {
                name: "Mira".to_string(),
                delta: -15,
            },
            Operation::GainExperience { amount: 130 },
            Operation::SaveGame {
                slot: "in-game".to_string(),
            },
            Operation::ChangeScene {
                scene: "crossroads".to_string(),
            },
        ];
        Reducer::default()
            .apply_all(&PlayerState::initial(), &ops)
            .0
    }

    #[test]
    fn round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("saves"));
        let state = played_state();

        store.save("slot-1", &state).unwrap();
        assert!(dir.path().join("saves").join("slot-1.json").is_file());

        let loaded = store.load("slot-1").unwrap().unwrap();
        assert_eq!(loaded.inventory, state.inventory);
        assert_eq!(loaded.achievements, state.achievements);
        assert_eq!(loaded.relationship("Mira"), -15);
        assert_eq!(loaded.level, 2);
        assert_eq!(loaded.experience, 30);
        assert_eq!(loaded.current_scene, "crossroads");
        assert!(loaded.save_slots.is_empty());
    }

    #[test]
    fn missing_dir_and_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("never-created"));
        assert_eq!(store.load("a").unwrap(), None);
        assert!(store.list_slots().unwrap().is_empty());
        assert!(!store.delete("a").unwrap());
    }

    #[test]
    fn slot_names_cannot_escape_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        let err = store.save("../escape", &PlayerState::initial()).unwrap_err();
        assert!(matches!(err, SaveError::InvalidSlotName(_)));
        assert!(matches!(
            store.load("../escape").unwrap_err(),
            SaveError::InvalidSlotName(_)
        ));
    }

    #[test]
    fn listing_skips_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        let state = PlayerState::initial();
        let at = |h| Utc.with_ymd_and_hms(2026, 7, 1, h, 0, 0).unwrap();
        store.put(SaveRecord::new("older", &state, at(1))).unwrap();
        store.put(SaveRecord::new("newer", &state, at(2))).unwrap();
        fs::write(dir.path().join("broken.json"), "{ nope").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let names: Vec<String> = store
            .list_slots()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["newer", "older"]);

        assert!(matches!(
            store.load("broken").unwrap_err(),
            SaveError::Json { .. }
        ));
    }

    #[test]
    fn delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save("gone", &PlayerState::initial()).unwrap();
        assert!(store.delete("gone").unwrap());
        assert!(!dir.path().join("gone.json").exists());
    }
}
