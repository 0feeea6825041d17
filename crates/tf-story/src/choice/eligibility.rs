//! Choice eligibility.

use serde::{Deserialize, Serialize};
use tf_core::PlayerState;

use super::requirements::MissingRequirement;
use crate::scene::ChoiceSpec;

/// Why a choice cannot be taken.
///
/// When several gates fail only the first is reported, in the order the
/// variants are declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnmetReason {
    /// The choice's condition is false.
    ConditionNotMet,
    /// One or more requirements are missing.
    RequirementsNotMet(Vec<MissingRequirement>),
    /// The skill check threshold is not reached.
    SkillCheckFailed {
        /// Skill name.
        skill: String,
        /// Required level.
        difficulty: i32,
        /// Current level.
        current: i32,
    },
}

impl std::fmt::Display for UnmetReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConditionNotMet => write!(f, "not available right now"),
            Self::RequirementsNotMet(missing) => {
                let parts: Vec<String> = missing.iter().map(|m| m.to_string()).collect();
                write!(f, "requires {}", parts.join(", "))
            }
            Self::SkillCheckFailed {
                skill,
                difficulty,
                current,
            } => write!(f, "{skill} check {difficulty} failed (have {current})"),
        }
    }
}

/// The outcome of evaluating a choice against a state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Eligibility {
    /// The first failing gate, or `None` when the choice can be taken.
    pub unmet: Option<UnmetReason>,
}

impl Eligibility {
    /// Whether the choice can be taken.
    pub fn is_eligible(&self) -> bool {
        self.unmet.is_none()
    }
}

/// Evaluate every gate on a choice.
///
/// Gates are checked as: condition, requirements, skill check. The result
/// depends only on its inputs.
pub fn evaluate(choice: &ChoiceSpec, state: &PlayerState) -> Eligibility {
    if let Some(condition) = &choice.condition
        && !condition.evaluate(state)
    {
        return Eligibility {
            unmet: Some(UnmetReason::ConditionNotMet),
        };
    }

    if let Some(requirements) = &choice.requirements {
        let missing = requirements.missing(state);
        if !missing.is_empty() {
            return Eligibility {
                unmet: Some(UnmetReason::RequirementsNotMet(missing)),
            };
        }
    }

    if let Some(check) = &choice.skill_check
        && !check.passes(state)
    {
        return Eligibility {
            unmet: Some(UnmetReason::SkillCheckFailed {
                skill: check.skill.clone(),
                difficulty: check.difficulty,
                current: state.skill(&check.skill),
            }),
        };
    }

    Eligibility::default()
}

/// Whether a choice can be taken in the given state.
pub fn is_eligible(choice: &ChoiceSpec, state: &PlayerState) -> bool {
    evaluate(choice, state).is_eligible()
}
