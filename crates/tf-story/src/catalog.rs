//! Scene catalog and scene packs.
//!
//! A catalog is composed once, before play, from an explicit list of packs.
//! Later packs override earlier ones scene by scene.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tf_core::START_SCENE;

use crate::error::{StoryError, StoryResult};
use crate::scene::Scene;

/// Scene id the resolver uses for its built-in fallback scene.
///
/// The validator accepts this id as a valid target even though no pack
/// defines it.
pub const FALLBACK_SCENE_ID: &str = "__fallback__";

/// Hub scene used as the fallback's "return" target when no pack names one.
pub const DEFAULT_HUB_SCENE: &str = START_SCENE;

const BUILTIN_PACK: &str = include_str!("../content/whispering_vale.json");

/// A source of scenes.
pub trait ScenePack {
    /// Pack name, for diagnostics.
    fn name(&self) -> &str;

    /// The scenes this pack provides.
    fn scenes(&self) -> Vec<(String, Scene)>;

    /// The scene new games start in, if this pack declares one.
    fn start_scene(&self) -> Option<&str> {
        None
    }

    /// The known-good hub scene, if this pack declares one.
    fn default_scene(&self) -> Option<&str> {
        None
    }
}

/// A scene pack loaded from JSON.
///
/// ```json
/// {
///   "start": "start",
///   "default": "crossroads",
///   "scenes": { "start": { "title": "...", "description": "...", "choices": [] } }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonPack {
    name: String,
    start: Option<String>,
    default: Option<String>,
    scenes: BTreeMap<String, Scene>,
}

#[derive(Deserialize)]
struct PackFile {
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    default: Option<String>,
    scenes: BTreeMap<String, Scene>,
}

impl JsonPack {
    /// Parse a pack from JSON source.
    pub fn parse(name: impl Into<String>, json: &str) -> StoryResult<Self> {
        let name = name.into();
        let file: PackFile = serde_json::from_str(json).map_err(|source| StoryError::Parse {
            name: name.clone(),
            source,
        })?;
        tracing::debug!(pack = %name, scenes = file.scenes.len(), "parsed scene pack");
        Ok(Self {
            name,
            start: file.start,
            default: file.default,
            scenes: file.scenes,
        })
    }

    /// Read and parse a pack file.
    pub fn from_file(path: &Path) -> StoryResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| StoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path.display().to_string(), &json)
    }

    /// Number of scenes in the pack.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the pack has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl ScenePack for JsonPack {
    fn name(&self) -> &str {
        &self.name
    }

    fn scenes(&self) -> Vec<(String, Scene)> {
        self.scenes
            .iter()
            .map(|(id, scene)| (id.clone(), scene.clone()))
            .collect()
    }

    fn start_scene(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn default_scene(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// The demo story shipped with the engine.
pub fn builtin_pack() -> StoryResult<JsonPack> {
    JsonPack::parse("whispering-vale", BUILTIN_PACK)
}

/// An immutable mapping from scene id to scene content.
#[derive(Debug, Clone)]
pub struct SceneCatalog {
    scenes: BTreeMap<String, Scene>,
    start: String,
    default: String,
}

impl Default for SceneCatalog {
    fn default() -> Self {
        Self::new(START_SCENE, DEFAULT_HUB_SCENE)
    }
}

impl SceneCatalog {
    /// Create an empty catalog with the given start and hub scene ids.
    pub fn new(start: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            scenes: BTreeMap::new(),
            start: start.into(),
            default: default.into(),
        }
    }

    /// Add a scene, replacing any scene with the same id.
    pub fn with_scene(mut self, id: impl Into<String>, scene: Scene) -> Self {
        self.insert(id, scene);
        self
    }

    /// Add a scene, returning the one it replaced.
    pub fn insert(&mut self, id: impl Into<String>, scene: Scene) -> Option<Scene> {
        self.scenes.insert(id.into(), scene)
    }

    /// Merge packs in order.
    ///
    /// The start and hub scene ids come from the last pack that declares
    /// them, falling back to [`START_SCENE`] and [`DEFAULT_HUB_SCENE`].
    pub fn compose(packs: &[&dyn ScenePack]) -> Self {
        let mut catalog = Self::default();
        for pack in packs {
            if let Some(start) = pack.start_scene() {
                catalog.start = start.to_string();
            }
            if let Some(default) = pack.default_scene() {
                catalog.default = default.to_string();
            }
            for (id, scene) in pack.scenes() {
                if catalog.insert(id.clone(), scene).is_some() {
                    tracing::warn!(pack = pack.name(), scene = %id, "scene overridden by later pack");
                }
            }
        }
        tracing::info!(
            scenes = catalog.len(),
            start = %catalog.start,
            default = %catalog.default,
            "scene catalog composed"
        );
        catalog
    }

    /// Catalog holding only the built-in demo story.
    pub fn builtin() -> StoryResult<Self> {
        let pack = builtin_pack()?;
        Ok(Self::compose(&[&pack]))
    }

    /// Look up a scene.
    pub fn get(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Whether a scene id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// Whether a scene id is a valid transition target.
    pub fn resolves(&self, id: &str) -> bool {
        id == FALLBACK_SCENE_ID || self.contains(id)
    }

    /// Iterate scenes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scene)> {
        self.scenes.iter().map(|(id, scene)| (id.as_str(), scene))
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// The scene new games start in.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The known-good hub scene.
    pub fn default_scene(&self) -> &str {
        &self.default
    }
}
