//! Player state management.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Scene every new game starts in.
pub const START_SCENE: &str = "start";

/// Inclusive bounds for skill values.
pub const SKILL_BOUNDS: (i32, i32) = (0, 100);
/// Inclusive bounds for relationship values.
pub const RELATIONSHIP_BOUNDS: (i32, i32) = (-100, 100);
/// Inclusive bounds for world-state values.
pub const WORLD_STATE_BOUNDS: (i32, i32) = (0, 100);

const STARTING_SKILLS: [(&str, i32); 4] = [
    ("agility", 10),
    ("charisma", 10),
    ("strength", 10),
    ("wisdom", 10),
];

/// The player's complete state.
///
/// Invariants maintained by the reducer:
/// - `0 <= health <= max_health`, and `health == 0` implies `game_over`
/// - `level >= 1` and `experience < level * experience_per_level`
/// - `score >= 0`
/// - skills in [`SKILL_BOUNDS`], relationships in [`RELATIONSHIP_BOUNDS`],
///   world state in [`WORLD_STATE_BOUNDS`]
/// - achievements, companions, abilities, secrets and lore hold no duplicates
///   and keep insertion order; the inventory may hold duplicates
/// - snapshots stored in `save_slots` never carry nested save slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    /// Identifier of the scene the player is in.
    pub current_scene: String,
    /// Current health.
    pub health: i32,
    /// Health cap.
    pub max_health: i32,
    /// Character level, starting at 1.
    pub level: i32,
    /// Experience toward the next level.
    pub experience: i32,
    /// Accumulated score.
    pub score: i32,
    /// Carried items in pickup order.
    pub inventory: Vec<String>,
    /// Unlocked achievements in unlock order.
    pub achievements: Vec<String>,
    /// Skill levels by name.
    pub skills: BTreeMap<String, i32>,
    /// Standing with named characters.
    pub relationships: BTreeMap<String, i32>,
    /// Named world conditions.
    pub world_state: BTreeMap<String, i32>,
    /// Recruited companions.
    pub companions: Vec<String>,
    /// Learned magical abilities.
    pub magical_abilities: Vec<String>,
    /// Unlocked secrets.
    pub secrets: Vec<String>,
    /// Discovered lore entries.
    pub lore: Vec<String>,
    /// Set once health reaches zero.
    pub game_over: bool,
    /// Set when the story is won.
    pub victory: bool,
    /// In-game save slots holding snapshots of earlier states.
    pub save_slots: BTreeMap<String, PlayerState>,
    /// Number of completed playthroughs carried across restarts.
    pub new_game_plus_level: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::initial()
    }
}

impl PlayerState {
    /// The state every new game starts from.
    pub fn initial() -> Self {
        Self {
            current_scene: START_SCENE.to_string(),
            health: 100,
            max_health: 100,
            level: 1,
            experience: 0,
            score: 10,
            inventory: Vec::new(),
            achievements: Vec::new(),
            skills: STARTING_SKILLS
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            relationships: BTreeMap::new(),
            world_state: BTreeMap::new(),
            companions: Vec::new(),
            magical_abilities: Vec::new(),
            secrets: Vec::new(),
            lore: Vec::new(),
            game_over: false,
            victory: false,
            save_slots: BTreeMap::new(),
            new_game_plus_level: 0,
        }
    }

    /// A copy of this state without its save slots.
    pub fn snapshot(&self) -> Self {
        Self {
            save_slots: BTreeMap::new(),
            ..self.clone()
        }
    }

    /// Skill level, or 0 if the skill has never been trained.
    pub fn skill(&self, name: &str) -> i32 {
        self.skills.get(name).copied().unwrap_or(0)
    }

    /// Relationship value, or 0 if the character is unknown.
    pub fn relationship(&self, name: &str) -> i32 {
        self.relationships.get(name).copied().unwrap_or(0)
    }

    /// World-state value, or 0 if the key has never been set.
    pub fn world_value(&self, name: &str) -> i32 {
        self.world_state.get(name).copied().unwrap_or(0)
    }

    /// Check if the player carries an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Number of copies of an item in the inventory.
    pub fn item_count(&self, item: &str) -> usize {
        self.inventory.iter().filter(|i| *i == item).count()
    }

    /// Check if an achievement is unlocked.
    pub fn has_achievement(&self, name: &str) -> bool {
        self.achievements.iter().any(|a| a == name)
    }

    /// Check if a companion has been recruited.
    pub fn has_companion(&self, name: &str) -> bool {
        self.companions.iter().any(|c| c == name)
    }

    /// Check if a magical ability has been learned.
    pub fn knows_ability(&self, name: &str) -> bool {
        self.magical_abilities.iter().any(|a| a == name)
    }

    /// Check if a secret has been unlocked.
    pub fn has_secret(&self, name: &str) -> bool {
        self.secrets.iter().any(|s| s == name)
    }

    /// Check if a lore entry has been discovered.
    pub fn has_lore(&self, name: &str) -> bool {
        self.lore.iter().any(|l| l == name)
    }

    /// Whether play has ended, by death or by victory.
    pub fn is_finished(&self) -> bool {
        self.game_over || self.victory
    }
}

/// Push `value` unless it is already present. Returns whether it was added.
pub(crate) fn insert_unique(set: &mut Vec<String>, value: &str) -> bool {
    if set.iter().any(|v| v == value) {
        false
    } else {
        set.push(value.to_string());
        true
    }
}

/// Add `delta` to the entry for `name`, clamped to `bounds`.
pub(crate) fn adjust_clamped(
    map: &mut BTreeMap<String, i32>,
    name: &str,
    delta: i32,
    bounds: (i32, i32),
) {
    let current = map.get(name).copied().unwrap_or(0);
    let next = current.saturating_add(delta).clamp(bounds.0, bounds.1);
    map.insert(name.to_string(), next);
}
