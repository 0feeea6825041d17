//! Description template substitution.
//!
//! Placeholders are written in braces: `{health}`, `{max_health}`,
//! `{level}`, `{experience}`, `{score}`, `{scene}`, `{inventory_count}`,
//! `{new_game_plus}`, and keyed lookups `{skill:NAME}`,
//! `{relationship:NAME}`, `{world:NAME}`. Unknown placeholders are kept as
//! written so a typo shows up in the rendered text instead of vanishing.

use tf_core::PlayerState;

/// Render a template against a player state.
pub fn render(template: &str, state: &PlayerState) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        match lookup(key, state) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

fn lookup(key: &str, state: &PlayerState) -> Option<String> {
    let value = match key.trim() {
        "health" => state.health.to_string(),
        "max_health" => state.max_health.to_string(),
        "level" => state.level.to_string(),
        "experience" => state.experience.to_string(),
        "score" => state.score.to_string(),
        "scene" => state.current_scene.clone(),
        "inventory_count" => state.inventory.len().to_string(),
        "new_game_plus" => state.new_game_plus_level.to_string(),
        other => {
            let (kind, name) = other.split_once(':')?;
            match kind {
                "skill" => state.skill(name).to_string(),
                "relationship" => state.relationship(name).to_string(),
                "world" => state.world_value(name).to_string(),
                _ => return None,
            }
        }
    };
    Some(value)
}
