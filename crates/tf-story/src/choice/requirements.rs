//! Requirement and skill-check gates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tf_core::PlayerState;

/// Prerequisites that must all be met to take a choice.
///
/// Items are checked for presence only; taking the choice does not consume
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirements {
    /// Achievements that must be unlocked.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<String>,
    /// Companions that must be recruited.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub companions: Vec<String>,
    /// Items that must be carried.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    /// Minimum skill levels.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub skills: BTreeMap<String, i32>,
}

impl Requirements {
    /// Whether there is nothing to check.
    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty()
            && self.companions.is_empty()
            && self.items.is_empty()
            && self.skills.is_empty()
    }

    /// Every requirement the state does not meet, in declaration order.
    pub fn missing(&self, state: &PlayerState) -> Vec<MissingRequirement> {
        let achievements = self
            .achievements
            .iter()
            .filter(|a| !state.has_achievement(a))
            .map(|a| MissingRequirement::Achievement(a.clone()));
        let companions = self
            .companions
            .iter()
            .filter(|c| !state.has_companion(c))
            .map(|c| MissingRequirement::Companion(c.clone()));
        let items = self
            .items
            .iter()
            .filter(|i| !state.has_item(i))
            .map(|i| MissingRequirement::Item(i.clone()));
        let skills = self.skills.iter().filter_map(|(skill, required)| {
            let current = state.skill(skill);
            (current < *required).then(|| MissingRequirement::Skill {
                skill: skill.clone(),
                required: *required,
                current,
            })
        });

        achievements.chain(companions).chain(items).chain(skills).collect()
    }
}

/// One unmet prerequisite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingRequirement {
    /// An achievement that is not unlocked.
    Achievement(String),
    /// A companion that is not recruited.
    Companion(String),
    /// An item that is not carried.
    Item(String),
    /// A skill below its required level.
    Skill {
        /// Skill name.
        skill: String,
        /// Required level.
        required: i32,
        /// Current level.
        current: i32,
    },
}

impl std::fmt::Display for MissingRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Achievement(name) => write!(f, "achievement '{name}'"),
            Self::Companion(name) => write!(f, "companion '{name}'"),
            Self::Item(name) => write!(f, "item '{name}'"),
            Self::Skill {
                skill,
                required,
                current,
            } => write!(f, "{skill} {required} (have {current})"),
        }
    }
}

/// A deterministic skill threshold.
///
/// The check passes when the named skill is at least `difficulty`; there is
/// no roll involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCheck {
    /// Skill name.
    #[serde(alias = "type")]
    pub skill: String,
    /// Minimum skill level.
    pub difficulty: i32,
}

impl SkillCheck {
    /// Create a skill check.
    pub fn new(skill: impl Into<String>, difficulty: i32) -> Self {
        Self {
            skill: skill.into(),
            difficulty,
        }
    }

    /// Whether the state passes the check.
    pub fn passes(&self, state: &PlayerState) -> bool {
        state.skill(&self.skill) >= self.difficulty
    }
}

impl std::fmt::Display for SkillCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.skill, self.difficulty)
    }
}
