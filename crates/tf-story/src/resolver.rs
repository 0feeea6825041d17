//! Scene resolution.
//!
//! [`resolve`] turns a scene id and a player state into a read-only
//! projection: rendered description, and every choice annotated with its
//! eligibility and the operations it would run. Unknown ids resolve to a
//! fixed fallback scene whose choices are never gated.

use tf_core::{Operation, PlayerState};

use crate::catalog::{FALLBACK_SCENE_ID, SceneCatalog};
use crate::choice::{SkillCheck, UnmetReason, evaluate};
use crate::scene::{ChoiceSpec, Scene};

/// The operations a choice runs when selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trigger {
    operations: Vec<Operation>,
}

impl Trigger {
    /// The operations, in the order they run.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The scene the trigger ends in, if it changes scene.
    pub fn target(&self) -> Option<&str> {
        self.operations.iter().rev().find_map(Operation::target_scene)
    }
}

/// A choice annotated for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableChoice {
    /// Text shown to the player.
    pub text: String,
    /// Whether the choice can be selected.
    pub eligible: bool,
    /// The skill check, so the UI can show what is being tested.
    pub skill_check: Option<SkillCheck>,
    /// Why the choice is locked, when it is.
    pub unmet: Option<UnmetReason>,
    /// What selecting the choice does.
    pub trigger: Trigger,
}

/// A render-ready scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableScene {
    /// The id that was resolved, or [`FALLBACK_SCENE_ID`].
    pub id: String,
    /// Scene title.
    pub title: String,
    /// Rendered description.
    pub description: String,
    /// Choices in display order, locked ones included.
    pub choices: Vec<RenderableChoice>,
    /// Whether this is the fallback scene.
    pub is_fallback: bool,
}

impl RenderableScene {
    /// Choices that can currently be selected.
    pub fn eligible_choices(&self) -> impl Iterator<Item = &RenderableChoice> {
        self.choices.iter().filter(|c| c.eligible)
    }
}

/// Resolve a scene for rendering. Never mutates the state.
///
/// The fallback id always resolves to the fixed fallback scene, even if a
/// pack defines a scene under that id.
pub fn resolve(catalog: &SceneCatalog, scene_id: &str, state: &PlayerState) -> RenderableScene {
    if scene_id == FALLBACK_SCENE_ID {
        return project(FALLBACK_SCENE_ID, &fallback_scene(catalog), state, true);
    }
    match catalog.get(scene_id) {
        Some(scene) => project(scene_id, scene, state, false),
        None => {
            tracing::warn!(scene = %scene_id, "scene not found, resolving fallback");
            project(FALLBACK_SCENE_ID, &fallback_scene(catalog), state, true)
        }
    }
}

/// The fixed recovery scene.
///
/// Offers, in order: the catalog's hub scene, its start scene, and a full
/// restart.
pub fn fallback_scene(catalog: &SceneCatalog) -> Scene {
    Scene::new(
        "Lost in the Mists",
        "The path you were following frays into grey nothing. Wherever you meant to go, \
         it is not here.",
    )
    .with_choice(
        ChoiceSpec::new("Find your way back to familiar ground")
            .with_target(catalog.default_scene()),
    )
    .with_choice(
        ChoiceSpec::new("Return to where your journey began").with_target(catalog.start()),
    )
    .with_choice(
        ChoiceSpec::new("Start over")
            .with_effect(Operation::RestartGame)
            .with_target(catalog.start()),
    )
}

fn project(id: &str, scene: &Scene, state: &PlayerState, is_fallback: bool) -> RenderableScene {
    let choices = scene
        .choices
        .iter()
        .map(|choice| {
            let eligibility = evaluate(choice, state);
            RenderableChoice {
                text: choice.text.clone(),
                eligible: eligibility.is_eligible(),
                skill_check: choice.skill_check.clone(),
                unmet: eligibility.unmet,
                trigger: Trigger {
                    operations: choice.operations(),
                },
            }
        })
        .collect();

    RenderableScene {
        id: id.to_string(),
        title: scene.title.clone(),
        description: scene.description.render(state),
        choices,
        is_fallback,
    }
}
