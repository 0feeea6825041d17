//! Error types for the story engine.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while loading content or driving play.
///
/// Resolution and validation never fail; these cover loading packs and
/// selecting choices that cannot be taken.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A scene pack file could not be read.
    #[error("cannot read scene pack {path}: {source}")]
    Io {
        /// Path of the pack file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A scene pack is not valid JSON for the content model.
    #[error("invalid scene pack '{name}': {source}")]
    Parse {
        /// Pack name or file path.
        name: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Choice index out of range for the current scene.
    #[error("invalid choice: {index} (scene has {available} choices)")]
    InvalidChoice {
        /// The requested 0-based index.
        index: usize,
        /// Number of choices in the scene.
        available: usize,
    },

    /// The selected choice is not currently eligible.
    #[error("cannot choose \"{text}\": {reason}")]
    ChoiceNotEligible {
        /// The choice text.
        text: String,
        /// Why the choice is locked.
        reason: String,
    },

    /// Core configuration error.
    #[error(transparent)]
    Core(#[from] tf_core::CoreError),
}
