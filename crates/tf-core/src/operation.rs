//! The closed set of named state operations.

use serde::{Deserialize, Serialize};

/// A state-changing operation the reducer knows how to apply.
///
/// Serialized with an `op` tag in camelCase, so scene content names
/// operations as `{"op": "addToInventory", "item": "Ancient Key"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    /// Append an item to the inventory. Duplicates are kept.
    AddToInventory {
        /// Item name.
        item: String,
    },
    /// Remove the first copy of an item, if carried.
    RemoveFromInventory {
        /// Item name.
        item: String,
    },
    /// Lose health, down to zero. Reaching zero ends the game.
    TakeDamage {
        /// Health to lose.
        amount: i32,
    },
    /// Regain health, up to the cap.
    Heal {
        /// Health to regain.
        amount: i32,
    },
    /// Move to another scene. The target is not checked here.
    ChangeScene {
        /// Target scene identifier.
        scene: String,
    },
    /// Unlock an achievement, awarding the bonus on first unlock.
    AddAchievement {
        /// Achievement name.
        name: String,
    },
    /// Add to the score.
    AddScore {
        /// Points to add.
        points: i32,
    },
    /// Gain experience, rolling overflow into level-ups.
    GainExperience {
        /// Experience to gain.
        amount: i32,
    },
    /// Train a skill.
    ImproveSkill {
        /// Skill name.
        skill: String,
        /// Amount to add; may be negative.
        amount: i32,
    },
    /// Change standing with a character.
    ModifyRelationship {
        /// Character name.
        name: String,
        /// Amount to add; may be negative.
        delta: i32,
    },
    /// Shift a world condition.
    AffectWorldState {
        /// World-state key.
        name: String,
        /// Amount to add; may be negative.
        delta: i32,
    },
    /// Unlock a secret.
    UnlockSecret {
        /// Secret name.
        name: String,
    },
    /// Discover a lore entry.
    GainLore {
        /// Lore entry name.
        name: String,
    },
    /// Recruit a companion.
    RecruitCompanion {
        /// Companion name.
        name: String,
    },
    /// Learn a magical ability.
    LearnMagicalAbility {
        /// Ability name.
        name: String,
    },
    /// Mark the story as won.
    DeclareVictory,
    /// Store a snapshot of the current state in an in-game slot.
    SaveGame {
        /// Slot name.
        slot: String,
    },
    /// Replace the current state with a slot's snapshot, if the slot exists.
    LoadGame {
        /// Slot name.
        slot: String,
    },
    /// Start over from the initial state, carrying New Game+ progress.
    RestartGame,
}

impl Operation {
    /// The operation's tag as it appears in content.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddToInventory { .. } => "addToInventory",
            Self::RemoveFromInventory { .. } => "removeFromInventory",
            Self::TakeDamage { .. } => "takeDamage",
            Self::Heal { .. } => "heal",
            Self::ChangeScene { .. } => "changeScene",
            Self::AddAchievement { .. } => "addAchievement",
            Self::AddScore { .. } => "addScore",
            Self::GainExperience { .. } => "gainExperience",
            Self::ImproveSkill { .. } => "improveSkill",
            Self::ModifyRelationship { .. } => "modifyRelationship",
            Self::AffectWorldState { .. } => "affectWorldState",
            Self::UnlockSecret { .. } => "unlockSecret",
            Self::GainLore { .. } => "gainLore",
            Self::RecruitCompanion { .. } => "recruitCompanion",
            Self::LearnMagicalAbility { .. } => "learnMagicalAbility",
            Self::DeclareVictory => "declareVictory",
            Self::SaveGame { .. } => "saveGame",
            Self::LoadGame { .. } => "loadGame",
            Self::RestartGame => "restartGame",
        }
    }

    /// The scene this operation moves to, if it is a scene change.
    pub fn target_scene(&self) -> Option<&str> {
        match self {
            Self::ChangeScene { scene } => Some(scene.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddToInventory { item } | Self::RemoveFromInventory { item } => {
                write!(f, "{}({item})", self.name())
            }
            Self::TakeDamage { amount } | Self::Heal { amount } => {
                write!(f, "{}({amount})", self.name())
            }
            Self::GainExperience { amount } => write!(f, "{}({amount})", self.name()),
            Self::AddScore { points } => write!(f, "{}({points})", self.name()),
            Self::ChangeScene { scene } => write!(f, "{}({scene})", self.name()),
            Self::ImproveSkill { skill, amount } => {
                write!(f, "{}({skill}, {amount})", self.name())
            }
            Self::ModifyRelationship { name, delta } | Self::AffectWorldState { name, delta } => {
                write!(f, "{}({name}, {delta})", self.name())
            }
            Self::AddAchievement { name }
            | Self::UnlockSecret { name }
            | Self::GainLore { name }
            | Self::RecruitCompanion { name }
            | Self::LearnMagicalAbility { name } => write!(f, "{}({name})", self.name()),
            Self::SaveGame { slot } | Self::LoadGame { slot } => {
                write!(f, "{}({slot})", self.name())
            }
            Self::DeclareVictory | Self::RestartGame => write!(f, "{}()", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_tagged_content() {
        let op: Operation =
            serde_json::from_str(r#"{"op": "addToInventory", "item": "Ancient Key"}"#).unwrap();
        assert_eq!(
            op,
            Operation::AddToInventory {
                item: "Ancient Key".to_string()
            }
        );

        let op: Operation = serde_json::from_str(r#"{"op": "restartGame"}"#).unwrap();
        assert_eq!(op, Operation::RestartGame);

        let op: Operation =
            serde_json::from_str(r#"{"op": "improveSkill", "skill": "wisdom", "amount": 5}"#)
                .unwrap();
        assert_eq!(op.name(), "improveSkill");
    }

    #[test]
    fn unknown_tag_is_rejected_at_load() {
        let result: Result<Operation, _> = serde_json::from_str(r#"{"op": "teleport"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serialized_tag_matches_name() {
        let op = Operation::LearnMagicalAbility {
            name: "Frost".to_string(),
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], op.name());
    }

    #[test]
    fn target_scene_only_for_scene_changes() {
        let op = Operation::ChangeScene {
            scene: "found_key".to_string(),
        };
        assert_eq!(op.target_scene(), Some("found_key"));
        assert_eq!(Operation::RestartGame.target_scene(), None);
    }

    #[test]
    fn display() {
        let op = Operation::ModifyRelationship {
            name: "Mira".to_string(),
            delta: -5,
        };
        assert_eq!(op.to_string(), "modifyRelationship(Mira, -5)");
        assert_eq!(Operation::RestartGame.to_string(), "restartGame()");
    }
}
