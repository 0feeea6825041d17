use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use tf_save::{JsonFileStore, SaveStore, SlotSummary};

use crate::config::CliConfig;

pub fn run(config: &CliConfig, save_dir: Option<&Path>) -> Result<(), String> {
    let store = JsonFileStore::new(config.save_dir(save_dir));
    let slots = store.list_slots().map_err(|e| e.to_string())?;

    if slots.is_empty() {
        println!("  No saved games.");
        return Ok(());
    }

    println!("{}", slot_table(&slots));
    Ok(())
}

/// Render slot summaries, newest first.
pub fn slot_table(slots: &[SlotSummary]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Slot", "Scene", "Level", "Score", "Saved"]);
    for slot in slots {
        table.add_row(vec![
            slot.name.clone(),
            slot.scene.clone(),
            slot.level.to_string(),
            slot.score.to_string(),
            slot.saved_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }
    table
}
