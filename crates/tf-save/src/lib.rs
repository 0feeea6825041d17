//! Save-slot persistence for Taleforge.
//!
//! The story engine never touches storage itself. A [`SaveStore`] takes a
//! [`tf_core::PlayerState`] snapshot under a slot name and hands it back
//! later; [`MemoryStore`] keeps slots in memory and [`JsonFileStore`] writes
//! one JSON file per slot.

/// Error types for persistence.
pub mod error;
/// JSON-file backed store.
pub mod file;
/// In-memory store.
pub mod memory;
/// Save records and slot summaries.
pub mod record;
/// The store trait.
pub mod store;

pub use error::{SaveError, SaveResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{SaveRecord, SlotSummary, validate_slot_name};
pub use store::SaveStore;
