//! Error types for persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for persistence operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that can occur while saving or loading.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Reading or writing a save file failed.
    #[error("cannot access {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A save file does not hold a valid record.
    #[error("corrupt save file {path}: {source}")]
    Json {
        /// The save file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Slot names are limited to ASCII letters, digits, `-` and `_`.
    #[error("invalid slot name: '{0}'")]
    InvalidSlotName(String),
}
