//! The mutation reducer.
//!
//! [`Reducer::apply`] is a pure function from a state and an [`Operation`]
//! to a new state. It never fails: out-of-range arguments are clamped at the
//! state invariants, unknown names read as zero, and missing save slots or
//! absent items turn the operation into a no-op.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::operation::Operation;
use crate::rules::Rules;
use crate::state::{
    PlayerState, RELATIONSHIP_BOUNDS, SKILL_BOUNDS, WORLD_STATE_BOUNDS, adjust_clamped,
    insert_unique,
};

/// A one-shot message for the presentation layer.
///
/// The reducer emits these alongside the new state; they are never stored in
/// the state itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// An achievement was unlocked for the first time.
    AchievementUnlocked {
        /// Achievement name.
        name: String,
    },
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AchievementUnlocked { name } => write!(f, "Achievement unlocked: {name}"),
        }
    }
}

/// The result of applying one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// The new state.
    pub state: PlayerState,
    /// Notification emitted by the operation, if any.
    pub notification: Option<Notification>,
}

/// Applies operations to player state under a set of [`Rules`].
#[derive(Debug, Clone, Default)]
pub struct Reducer {
    rules: Rules,
}

impl Reducer {
    /// Create a reducer, rejecting out-of-range rules.
    pub fn new(rules: Rules) -> CoreResult<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    /// The rules this reducer applies.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Apply a single operation, returning the new state.
    pub fn apply(&self, state: &PlayerState, op: &Operation) -> Applied {
        tracing::debug!(%op, scene = %state.current_scene, "applying operation");

        let mut next = state.clone();
        let mut notification = None;

        match op {
            Operation::AddToInventory { item } => next.inventory.push(item.clone()),
            Operation::RemoveFromInventory { item } => {
                if let Some(pos) = next.inventory.iter().position(|i| i == item) {
                    next.inventory.remove(pos);
                }
            }
            Operation::TakeDamage { amount } => {
                next.health = next.health.saturating_sub((*amount).max(0)).max(0);
                if next.health == 0 {
                    next.game_over = true;
                }
            }
            Operation::Heal { amount } => {
                next.health = next
                    .health
                    .saturating_add((*amount).max(0))
                    .min(next.max_health);
            }
            Operation::ChangeScene { scene } => next.current_scene = scene.clone(),
            Operation::AddAchievement { name } => {
                if insert_unique(&mut next.achievements, name) {
                    next.score = next.score.saturating_add(self.rules.achievement_bonus);
                    notification = Some(Notification::AchievementUnlocked { name: name.clone() });
                }
            }
            Operation::AddScore { points } => {
                next.score = next.score.saturating_add(*points).max(0);
            }
            Operation::GainExperience { amount } => self.gain_experience(&mut next, *amount),
            Operation::ImproveSkill { skill, amount } => {
                adjust_clamped(&mut next.skills, skill, *amount, SKILL_BOUNDS);
            }
            Operation::ModifyRelationship { name, delta } => {
                adjust_clamped(&mut next.relationships, name, *delta, RELATIONSHIP_BOUNDS);
            }
            Operation::AffectWorldState { name, delta } => {
                adjust_clamped(&mut next.world_state, name, *delta, WORLD_STATE_BOUNDS);
            }
            Operation::UnlockSecret { name } => {
                insert_unique(&mut next.secrets, name);
            }
            Operation::GainLore { name } => {
                insert_unique(&mut next.lore, name);
            }
            Operation::RecruitCompanion { name } => {
                insert_unique(&mut next.companions, name);
            }
            Operation::LearnMagicalAbility { name } => {
                insert_unique(&mut next.magical_abilities, name);
            }
            Operation::DeclareVictory => next.victory = true,
            Operation::SaveGame { slot } => {
                next.save_slots.insert(slot.clone(), state.snapshot());
            }
            Operation::LoadGame { slot } => match state.save_slots.get(slot) {
                Some(saved) => {
                    next = PlayerState {
                        save_slots: state.save_slots.clone(),
                        ..saved.clone()
                    };
                }
                None => tracing::debug!(%slot, "no such save slot, ignoring load"),
            },
            Operation::RestartGame => {
                let carried = state.new_game_plus_level + u32::from(state.victory);
                next = PlayerState {
                    new_game_plus_level: carried,
                    ..PlayerState::initial()
                };
            }
        }

        Applied {
            state: next,
            notification,
        }
    }

    /// Apply operations in order, collecting every notification.
    pub fn apply_all<'a>(
        &self,
        state: &PlayerState,
        ops: impl IntoIterator<Item = &'a Operation>,
    ) -> (PlayerState, Vec<Notification>) {
        let mut current = state.clone();
        let mut notifications = Vec::new();
        for op in ops {
            let applied = self.apply(&current, op);
            current = applied.state;
            notifications.extend(applied.notification);
        }
        (current, notifications)
    }

    /// Roll experience overflow into level-ups.
    ///
    /// Health is clamped to the new cap once, after the whole rollover.
    fn gain_experience(&self, state: &mut PlayerState, amount: i32) {
        state.experience = state.experience.saturating_add(amount.max(0));

        let mut gained_levels = 0;
        loop {
            let threshold = self.rules.level_threshold(state.level);
            if state.experience < threshold {
                break;
            }
            state.experience -= threshold;
            state.level = state.level.saturating_add(1);
            state.max_health = state.max_health.saturating_add(self.rules.health_per_level);
            state.health = state.health.saturating_add(self.rules.health_per_level);
            gained_levels += 1;
        }
        state.health = state.health.min(state.max_health);

        if gained_levels > 0 {
            tracing::debug!(level = state.level, gained_levels, "level up");
        }
    }
}

/// Apply one operation under the default [`Rules`].
pub fn apply(state: &PlayerState, op: &Operation) -> PlayerState {
    Reducer::default().apply(state, op).state
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reducer() -> Reducer {
        Reducer::default()
    }

    fn op_add_item(item: &str) -> Operation {
        Operation::AddToInventory {
            item: item.to_string(),
        }
    }

    #[test]
    fn inventory_keeps_duplicates() {
        let state = PlayerState::initial();
        let state = apply(&state, &op_add_item("Potion"));
        let state = apply(&state, &op_add_item("Potion"));
        assert_eq!(state.inventory, vec!["Potion", "Potion"]);
    }

    #[test]
    fn remove_first_copy_only() {
        let mut state = PlayerState::initial();
        state.inventory = vec!["Potion".into(), "Rope".into(), "Potion".into()];
        let state = apply(
            &state,
            &Operation::RemoveFromInventory {
                item: "Potion".to_string(),
            },
        );
        assert_eq!(state.inventory, vec!["Rope", "Potion"]);
    }

    #[test]
    fn remove_absent_item_is_noop() {
        let state = PlayerState::initial();
        let next = apply(
            &state,
            &Operation::RemoveFromInventory {
                item: "Lantern".to_string(),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn fatal_damage() {
        let mut state = PlayerState::initial();
        state.health = 15;
        let state = apply(&state, &Operation::TakeDamage { amount: 20 });
        assert_eq!(state.health, 0);
        assert!(state.game_over);
    }

    #[test]
    fn heal_stops_at_cap() {
        let mut state = PlayerState::initial();
        state.health = 90;
        let state = apply(&state, &Operation::Heal { amount: 50 });
        assert_eq!(state.health, 100);
    }

    #[test]
    fn negative_amounts_are_ignored() {
        let mut state = PlayerState::initial();
        state.health = 50;
        let healed = apply(&state, &Operation::Heal { amount: -30 });
        assert_eq!(healed.health, 50);
        let damaged = apply(&state, &Operation::TakeDamage { amount: -30 });
        assert_eq!(damaged.health, 50);
        let trained = apply(&state, &Operation::GainExperience { amount: -30 });
        assert_eq!(trained.experience, 0);
    }

    #[test]
    fn score_never_goes_negative() {
        let state = apply(
            &PlayerState::initial(),
            &Operation::AddScore { points: -1000 },
        );
        assert_eq!(state.score, 0);
    }

    #[test]
    fn change_scene_does_not_validate() {
        let state = apply(
            &PlayerState::initial(),
            &Operation::ChangeScene {
                scene: "nowhere".to_string(),
            },
        );
        assert_eq!(state.current_scene, "nowhere");
    }

    #[test]
    fn achievement_awards_bonus_once() {
        let op = Operation::AddAchievement {
            name: "Keen Observer".to_string(),
        };
        let first = reducer().apply(&PlayerState::initial(), &op);
        assert_eq!(first.state.score, 110);
        assert_eq!(
            first.notification,
            Some(Notification::AchievementUnlocked {
                name: "Keen Observer".to_string()
            })
        );

        let second = reducer().apply(&first.state, &op);
        assert_eq!(second.state.score, 110);
        assert_eq!(second.state.achievements, vec!["Keen Observer"]);
        assert!(second.notification.is_none());
    }

    #[test]
    fn level_up_rollover() {
        let mut state = PlayerState::initial();
        state.experience = 90;
        let state = apply(&state, &Operation::GainExperience { amount: 30 });
        assert_eq!(state.level, 2);
        assert_eq!(state.experience, 20);
        assert_eq!(state.max_health, 120);
        assert_eq!(state.health, 120);
    }

    #[test]
    fn level_up_with_wounds_keeps_gap() {
        let mut state = PlayerState::initial();
        state.health = 40;
        let state = apply(&state, &Operation::GainExperience { amount: 100 });
        assert_eq!(state.level, 2);
        assert_eq!(state.health, 60);
        assert_eq!(state.max_health, 120);
    }

    #[test]
    fn multi_level_rollover() {
        // 100 (level 1) + 200 (level 2) + 300 (level 3) = 600
        let state = apply(
            &PlayerState::initial(),
            &Operation::GainExperience { amount: 650 },
        );
        assert_eq!(state.level, 4);
        assert_eq!(state.experience, 50);
        assert_eq!(state.max_health, 160);
        assert_eq!(state.health, 160);
    }

    #[test]
    fn custom_rules_change_leveling() {
        let rules = Rules::default()
            .with_experience_per_level(10)
            .with_health_per_level(5);
        let reducer = Reducer::new(rules).unwrap();
        let applied = reducer.apply(
            &PlayerState::initial(),
            &Operation::GainExperience { amount: 10 },
        );
        assert_eq!(applied.state.level, 2);
        assert_eq!(applied.state.max_health, 105);
    }

    #[test]
    fn invalid_rules_rejected() {
        assert!(Reducer::new(Rules::default().with_experience_per_level(0)).is_err());
    }

    #[test]
    fn missing_skill_starts_at_zero() {
        let state = apply(
            &PlayerState::initial(),
            &Operation::ImproveSkill {
                skill: "alchemy".to_string(),
                amount: 7,
            },
        );
        assert_eq!(state.skill("alchemy"), 7);
    }

    #[test]
    fn relationship_and_world_state_clamp() {
        let state = apply(
            &PlayerState::initial(),
            &Operation::ModifyRelationship {
                name: "Mira".to_string(),
                delta: -500,
            },
        );
        assert_eq!(state.relationship("Mira"), -100);

        let state = apply(
            &state,
            &Operation::AffectWorldState {
                name: "corruption".to_string(),
                delta: -5,
            },
        );
        assert_eq!(state.world_value("corruption"), 0);
    }

    #[test]
    fn unique_sets_ignore_repeats() {
        let ops = [
            Operation::UnlockSecret {
                name: "Hidden Door".to_string(),
            },
            Operation::UnlockSecret {
                name: "Hidden Door".to_string(),
            },
            Operation::GainLore {
                name: "First Age".to_string(),
            },
            Operation::GainLore {
                name: "First Age".to_string(),
            },
            Operation::RecruitCompanion {
                name: "Mira".to_string(),
            },
            Operation::RecruitCompanion {
                name: "Mira".to_string(),
            },
            Operation::LearnMagicalAbility {
                name: "Frost".to_string(),
            },
            Operation::LearnMagicalAbility {
                name: "Frost".to_string(),
            },
        ];
        let (state, notifications) = reducer().apply_all(&PlayerState::initial(), &ops);
        assert_eq!(state.secrets, vec!["Hidden Door"]);
        assert_eq!(state.lore, vec!["First Age"]);
        assert_eq!(state.companions, vec!["Mira"]);
        assert_eq!(state.magical_abilities, vec!["Frost"]);
        assert_eq!(state.score, 10);
        assert!(notifications.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut state = PlayerState::initial();
        state.score = 300;
        state.inventory.push("Ancient Key".to_string());
        state.current_scene = "crypt".to_string();

        let saved = apply(
            &state,
            &Operation::SaveGame {
                slot: "one".to_string(),
            },
        );
        let loaded = apply(
            &saved,
            &Operation::LoadGame {
                slot: "one".to_string(),
            },
        );

        assert_eq!(loaded.current_scene, state.current_scene);
        assert_eq!(loaded.health, state.health);
        assert_eq!(loaded.max_health, state.max_health);
        assert_eq!(loaded.level, state.level);
        assert_eq!(loaded.experience, state.experience);
        assert_eq!(loaded.score, state.score);
        assert_eq!(loaded.inventory, state.inventory);
        assert_eq!(loaded.achievements, state.achievements);
        assert_eq!(loaded.skills, state.skills);
        assert_eq!(loaded.relationships, state.relationships);
        assert_eq!(loaded.world_state, state.world_state);
        assert_eq!(loaded.companions, state.companions);
        assert_eq!(loaded.magical_abilities, state.magical_abilities);
        assert_eq!(loaded.secrets, state.secrets);
        assert_eq!(loaded.lore, state.lore);
        assert_eq!(loaded.game_over, state.game_over);
        assert_eq!(loaded.victory, state.victory);
        assert_eq!(loaded.new_game_plus_level, state.new_game_plus_level);
        assert_eq!(loaded.save_slots, saved.save_slots);
    }

    #[test]
    fn saved_snapshots_are_not_nested() {
        let state = apply(
            &PlayerState::initial(),
            &Operation::SaveGame {
                slot: "a".to_string(),
            },
        );
        let state = apply(
            &state,
            &Operation::SaveGame {
                slot: "b".to_string(),
            },
        );
        assert_eq!(state.save_slots.len(), 2);
        assert!(state.save_slots["b"].save_slots.is_empty());
    }

    #[test]
    fn load_keeps_other_slots() {
        let state = apply(
            &PlayerState::initial(),
            &Operation::SaveGame {
                slot: "early".to_string(),
            },
        );
        let state = apply(&state, &Operation::AddScore { points: 40 });
        let state = apply(
            &state,
            &Operation::SaveGame {
                slot: "late".to_string(),
            },
        );
        let loaded = apply(
            &state,
            &Operation::LoadGame {
                slot: "early".to_string(),
            },
        );
        assert_eq!(loaded.score, 10);
        assert!(loaded.save_slots.contains_key("early"));
        assert!(loaded.save_slots.contains_key("late"));
    }

    #[test]
    fn load_missing_slot_is_noop() {
        let state = PlayerState::initial();
        let next = apply(
            &state,
            &Operation::LoadGame {
                slot: "ghost".to_string(),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn restart_carries_new_game_plus() {
        let mut state = PlayerState::initial();
        state.score = 999;
        state.victory = true;
        state.new_game_plus_level = 2;
        let restarted = apply(&state, &Operation::RestartGame);
        assert_eq!(restarted.new_game_plus_level, 3);
        assert_eq!(restarted.score, 10);
        assert!(!restarted.victory);

        let again = apply(&restarted, &Operation::RestartGame);
        assert_eq!(again.new_game_plus_level, 3);
    }

    #[test]
    fn declare_victory() {
        let state = apply(&PlayerState::initial(), &Operation::DeclareVictory);
        assert!(state.victory);
        assert!(state.is_finished());
    }

    #[test]
    fn apply_leaves_input_untouched() {
        let state = PlayerState::initial();
        let before = state.clone();
        let _ = apply(&state, &Operation::TakeDamage { amount: 30 });
        assert_eq!(state, before);
    }

    fn health_op() -> impl Strategy<Value = Operation> {
        prop_oneof![
            (-50i32..500).prop_map(|amount| Operation::TakeDamage { amount }),
            (-50i32..500).prop_map(|amount| Operation::Heal { amount }),
        ]
    }

    proptest! {
        #[test]
        fn health_stays_in_bounds(ops in proptest::collection::vec(health_op(), 0..40)) {
            let mut state = PlayerState::initial();
            for op in &ops {
                state = apply(&state, op);
                prop_assert!(state.health >= 0);
                prop_assert!(state.health <= state.max_health);
                if state.health == 0 {
                    prop_assert!(state.game_over);
                }
            }
        }

        #[test]
        fn experience_stays_below_threshold(
            start_exp in 0i32..100,
            gains in proptest::collection::vec(any::<i32>(), 1..10),
        ) {
            let mut state = PlayerState::initial();
            state.experience = start_exp;
            for amount in gains {
                let before = state.level;
                state = apply(&state, &Operation::GainExperience { amount });
                prop_assert!(state.level >= before);
                prop_assert!(state.experience >= 0);
                prop_assert!(state.experience < state.level.saturating_mul(100));
                prop_assert!(state.health <= state.max_health);
            }
        }

        #[test]
        fn mappings_stay_clamped(deltas in proptest::collection::vec(any::<i32>(), 1..20)) {
            let mut state = PlayerState::initial();
            for delta in deltas {
                state = apply(&state, &Operation::ImproveSkill { skill: "wisdom".into(), amount: delta });
                state = apply(&state, &Operation::ModifyRelationship { name: "Mira".into(), delta });
                state = apply(&state, &Operation::AffectWorldState { name: "peace".into(), delta });
                prop_assert!((0..=100).contains(&state.skill("wisdom")));
                prop_assert!((-100..=100).contains(&state.relationship("Mira")));
                prop_assert!((0..=100).contains(&state.world_value("peace")));
            }
        }

        #[test]
        fn achievements_are_idempotent(name in "[A-Za-z ]{1,16}", repeats in 1usize..5) {
            let op = Operation::AddAchievement { name: name.clone() };
            let once = apply(&PlayerState::initial(), &op);
            let mut many = PlayerState::initial();
            for _ in 0..repeats {
                many = apply(&many, &op);
            }
            prop_assert_eq!(&once.achievements, &many.achievements);
            prop_assert_eq!(once.score, many.score);
        }
    }
}
