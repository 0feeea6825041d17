//! Tunable constants for levelling and scoring.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Point values the reducer applies.
///
/// These are content decisions rather than engine behavior, so they live in
/// a small config record instead of being hard-coded in the reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Score awarded the first time an achievement is unlocked.
    pub achievement_bonus: i32,
    /// Experience needed per level: advancing from level `n` costs
    /// `n * experience_per_level`.
    pub experience_per_level: i32,
    /// Max health (and current health) gained per level-up.
    pub health_per_level: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            achievement_bonus: 100,
            experience_per_level: 100,
            health_per_level: 20,
        }
    }
}

impl Rules {
    /// Set the achievement score bonus.
    pub fn with_achievement_bonus(mut self, bonus: i32) -> Self {
        self.achievement_bonus = bonus;
        self
    }

    /// Set the experience cost multiplier per level.
    pub fn with_experience_per_level(mut self, experience: i32) -> Self {
        self.experience_per_level = experience;
        self
    }

    /// Set the health gained per level-up.
    pub fn with_health_per_level(mut self, health: i32) -> Self {
        self.health_per_level = health;
        self
    }

    /// Experience required to advance past `level`.
    pub fn level_threshold(&self, level: i32) -> i32 {
        level.saturating_mul(self.experience_per_level)
    }

    /// Check that every value is in range.
    ///
    /// A non-positive `experience_per_level` would make level-up rollover
    /// loop forever, so it is rejected here rather than guarded in the
    /// reducer.
    pub fn validate(&self) -> CoreResult<()> {
        if self.experience_per_level <= 0 {
            return Err(CoreError::InvalidRules {
                field: "experience_per_level",
                expected: "positive",
                value: self.experience_per_level,
            });
        }
        if self.health_per_level < 0 {
            return Err(CoreError::InvalidRules {
                field: "health_per_level",
                expected: "non-negative",
                value: self.health_per_level,
            });
        }
        if self.achievement_bonus < 0 {
            return Err(CoreError::InvalidRules {
                field: "achievement_bonus",
                expected: "non-negative",
                value: self.achievement_bonus,
            });
        }
        Ok(())
    }
}
