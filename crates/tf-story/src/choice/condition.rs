//! Condition evaluation for choice visibility.

use serde::{Deserialize, Serialize};
use tf_core::PlayerState;

/// A predicate over player state.
///
/// Conditions are data, so a catalog can be loaded from JSON and walked by
/// the validator without running any content code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Health is at least this value.
    HealthAtLeast(i32),
    /// Health is below this value.
    HealthBelow(i32),
    /// Level is at least this value.
    LevelAtLeast(i32),
    /// Score is at least this value.
    ScoreAtLeast(i32),
    /// The player carries an item.
    HasItem(String),
    /// An achievement is unlocked.
    HasAchievement(String),
    /// A companion is recruited.
    HasCompanion(String),
    /// A magical ability is learned.
    KnowsAbility(String),
    /// A secret is unlocked.
    HasSecret(String),
    /// A lore entry is discovered.
    HasLore(String),
    /// A skill is at least a level.
    SkillAtLeast {
        /// Skill name.
        skill: String,
        /// Minimum level.
        min: i32,
    },
    /// A relationship is at least a value.
    RelationshipAtLeast {
        /// Character name.
        name: String,
        /// Minimum value.
        min: i32,
    },
    /// A relationship is below a value.
    RelationshipBelow {
        /// Character name.
        name: String,
        /// Exclusive upper bound.
        max: i32,
    },
    /// A world-state value is at least a value.
    WorldStateAtLeast {
        /// World-state key.
        name: String,
        /// Minimum value.
        min: i32,
    },
    /// A world-state value is below a value.
    WorldStateBelow {
        /// World-state key.
        name: String,
        /// Exclusive upper bound.
        max: i32,
    },
    /// The story has been won.
    Victory,
    /// At least this many playthroughs completed.
    NewGamePlusAtLeast(u32),
    /// Logical NOT.
    Not(Box<Condition>),
    /// Logical AND.
    All(Vec<Condition>),
    /// Logical OR.
    Any(Vec<Condition>),
    /// Always true.
    #[default]
    Always,
}

impl Condition {
    /// Evaluate the condition against the current state.
    pub fn evaluate(&self, state: &PlayerState) -> bool {
        match self {
            Condition::HealthAtLeast(n) => state.health >= *n,
            Condition::HealthBelow(n) => state.health < *n,
            Condition::LevelAtLeast(n) => state.level >= *n,
            Condition::ScoreAtLeast(n) => state.score >= *n,
            Condition::HasItem(item) => state.has_item(item),
            Condition::HasAchievement(name) => state.has_achievement(name),
            Condition::HasCompanion(name) => state.has_companion(name),
            Condition::KnowsAbility(name) => state.knows_ability(name),
            Condition::HasSecret(name) => state.has_secret(name),
            Condition::HasLore(name) => state.has_lore(name),
            Condition::SkillAtLeast { skill, min } => state.skill(skill) >= *min,
            Condition::RelationshipAtLeast { name, min } => state.relationship(name) >= *min,
            Condition::RelationshipBelow { name, max } => state.relationship(name) < *max,
            Condition::WorldStateAtLeast { name, min } => state.world_value(name) >= *min,
            Condition::WorldStateBelow { name, max } => state.world_value(name) < *max,
            Condition::Victory => state.victory,
            Condition::NewGamePlusAtLeast(n) => state.new_game_plus_level >= *n,
            Condition::Not(inner) => !inner.evaluate(state),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(state)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(state)),
            Condition::Always => true,
        }
    }
}
