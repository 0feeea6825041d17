use std::path::PathBuf;

use comfy_table::{ContentArrangement, Table};

use crate::config::CliConfig;

pub fn run(config: &CliConfig, catalogs: &[PathBuf], include_builtin: bool) -> Result<(), String> {
    let catalog = super::load_catalog(config, catalogs, include_builtin)?;

    if catalog.is_empty() {
        println!("  No scenes found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Choices", "Leads to"]);

    for (id, scene) in catalog.iter() {
        let mut targets: Vec<&str> = scene.choices.iter().flat_map(|c| c.targets()).collect();
        targets.sort_unstable();
        targets.dedup();
        let leads_to = if targets.is_empty() {
            "-".to_string()
        } else {
            targets.join(", ")
        };

        let marker = if id == catalog.start() {
            format!("{id} (start)")
        } else if id == catalog.default_scene() {
            format!("{id} (hub)")
        } else {
            id.to_string()
        };

        table.add_row(vec![
            marker,
            scene.title.clone(),
            scene.choices.len().to_string(),
            leads_to,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} scene{}", catalog.len(), super::plural(catalog.len()));

    Ok(())
}
