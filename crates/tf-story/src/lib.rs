//! Scene-graph narrative engine for Taleforge.
//!
//! Scenes are plain data: a title, a description (plain or templated), and a
//! list of choices. Each choice names the reducer operations it runs and the
//! scene it moves to, plus optional gates (a condition, requirements, a skill
//! check). This crate decides which choices are eligible, resolves scenes
//! into render-ready projections with a fixed fallback for unknown ids,
//! validates whole catalogs, and drives play through [`Engine`].

/// Scene catalog and scene packs.
pub mod catalog;
/// Choice gates: conditions, requirements, skill checks, and eligibility.
pub mod choice;
/// Play session holding the single current player state.
pub mod engine;
/// Error types for the story engine.
pub mod error;
/// Scene resolution into render-ready projections.
pub mod resolver;
/// Scene and choice content types.
pub mod scene;
/// Description template substitution.
pub mod template;
/// Static scene-graph validation.
pub mod validator;

pub use catalog::{FALLBACK_SCENE_ID, JsonPack, SceneCatalog, ScenePack, builtin_pack};
pub use choice::{
    Condition, Eligibility, MissingRequirement, Requirements, SkillCheck, UnmetReason, evaluate,
    is_eligible,
};
pub use engine::Engine;
pub use error::{StoryError, StoryResult};
pub use resolver::{RenderableChoice, RenderableScene, Trigger, resolve};
pub use scene::{ChoiceSpec, Description, Scene};
pub use validator::{ValidationIssue, ValidationReport, validate};
