pub mod check;
pub mod play;
pub mod scenes;
pub mod slots;

use std::path::PathBuf;

use tf_story::{JsonPack, SceneCatalog, ScenePack, builtin_pack};

use crate::config::CliConfig;

/// Compose the catalog: built-in story, then config packs, then
/// command-line packs, later ones overriding earlier ones.
fn load_catalog(
    config: &CliConfig,
    extra: &[PathBuf],
    include_builtin: bool,
) -> Result<SceneCatalog, String> {
    let mut packs = Vec::new();
    if include_builtin {
        packs.push(builtin_pack().map_err(|e| e.to_string())?);
    }
    for path in config.catalogs.iter().chain(extra) {
        packs.push(JsonPack::from_file(path).map_err(|e| e.to_string())?);
    }
    if packs.is_empty() {
        return Err("no scene packs given".into());
    }

    let refs: Vec<&dyn ScenePack> = packs.iter().map(|p| p as &dyn ScenePack).collect();
    Ok(SceneCatalog::compose(&refs))
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
