//! Scene and choice content types.

use serde::{Deserialize, Serialize};
use tf_core::{Operation, PlayerState};

use crate::choice::{Condition, Requirements, SkillCheck};
use crate::template;

/// A node in the narrative graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene title.
    pub title: String,
    /// Body text, plain or templated.
    pub description: Description,
    /// Choices in display order.
    #[serde(default)]
    pub choices: Vec<ChoiceSpec>,
}

impl Scene {
    /// Create a scene with no choices.
    pub fn new(title: impl Into<String>, description: impl Into<Description>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            choices: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: ChoiceSpec) -> Self {
        self.choices.push(choice);
        self
    }
}

/// Scene body text.
///
/// A bare JSON string is plain text; `{"template": "..."}` is rendered
/// against the player state on every resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    /// Fixed text.
    Text(String),
    /// Text with `{placeholder}` substitutions.
    Template {
        /// The template source.
        template: String,
    },
}

impl Description {
    /// Create a templated description.
    pub fn template(source: impl Into<String>) -> Self {
        Self::Template {
            template: source.into(),
        }
    }

    /// Produce the text shown for `state`.
    pub fn render(&self, state: &PlayerState) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Template { template } => template::render(template, state),
        }
    }

    /// Whether the source text is blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Template { template } => template.trim().is_empty(),
        }
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Description {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A player-selectable choice.
///
/// Selecting the choice runs `effects` in order, then moves to `target` if
/// one is set. A choice without a target re-shows the same scene.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChoiceSpec {
    /// Text shown to the player.
    pub text: String,
    /// Operations applied when the choice is taken.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Operation>,
    /// Scene to move to after the effects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Deterministic skill threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_check: Option<SkillCheck>,
    /// Prerequisites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Requirements>,
    /// Custom predicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl ChoiceSpec {
    /// Create an ungated choice with no effects.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Add an effect.
    pub fn with_effect(mut self, op: Operation) -> Self {
        self.effects.push(op);
        self
    }

    /// Set the target scene.
    pub fn with_target(mut self, scene: impl Into<String>) -> Self {
        self.target = Some(scene.into());
        self
    }

    /// Set the skill check.
    pub fn with_skill_check(mut self, check: SkillCheck) -> Self {
        self.skill_check = Some(check);
        self
    }

    /// Set the requirements.
    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = Some(requirements);
        self
    }

    /// Set the condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether selecting the choice does anything.
    pub fn has_trigger(&self) -> bool {
        !self.effects.is_empty() || self.target.is_some()
    }

    /// The full operation sequence: effects, then the scene change.
    pub fn operations(&self) -> Vec<Operation> {
        let mut ops = self.effects.clone();
        if let Some(target) = &self.target {
            ops.push(Operation::ChangeScene {
                scene: target.clone(),
            });
        }
        ops
    }

    /// Every scene id this choice can move to.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.effects
            .iter()
            .filter_map(Operation::target_scene)
            .chain(self.target.as_deref())
    }
}
