//! Static validation of a scene catalog.
//!
//! Checks that every scene is well-formed, that every scene change a choice
//! can perform lands on an existing scene (or the fallback), and which
//! scenes can never be reached from the start or hub scenes. The report is a
//! diagnostic only; play never consults it.

use std::collections::{BTreeSet, VecDeque};

use crate::catalog::{FALLBACK_SCENE_ID, SceneCatalog};

/// A scene with malformed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidScene {
    /// Scene id.
    pub scene: String,
    /// What is wrong.
    pub message: String,
}

/// A scene change to an id that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTarget {
    /// Scene holding the choice, or `None` for the catalog's own start/hub ids.
    pub scene: Option<String>,
    /// 0-based choice index within the scene.
    pub choice: Option<usize>,
    /// The unresolved target id.
    pub target: String,
}

/// Findings from [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Scenes with a blank title or description, no choices, choices
    /// without text or trigger, or a reserved id.
    pub invalid_scenes: Vec<InvalidScene>,
    /// Scene changes to unknown ids.
    pub missing_targets: Vec<MissingTarget>,
    /// Scenes not reachable from the start or hub scenes.
    pub unreachable: Vec<String>,
}

impl ValidationReport {
    /// Whether any content-integrity error was found.
    pub fn has_errors(&self) -> bool {
        !self.invalid_scenes.is_empty() || !self.missing_targets.is_empty()
    }

    /// Whether nothing at all was found.
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && self.unreachable.is_empty()
    }

    /// Every finding as a flat list, errors first.
    pub fn issues(&self) -> Vec<ValidationIssue> {
        let invalid = self.invalid_scenes.iter().map(|s| ValidationIssue {
            scene: s.scene.clone(),
            message: s.message.clone(),
            is_error: true,
        });
        let missing = self.missing_targets.iter().map(|m| {
            let message = match m.choice {
                Some(index) => format!("choice {} targets unknown scene '{}'", index + 1, m.target),
                None => format!("catalog references unknown scene '{}'", m.target),
            };
            ValidationIssue {
                scene: m.scene.clone().unwrap_or_else(|| "catalog".to_string()),
                message,
                is_error: true,
            }
        });
        let unreachable = self.unreachable.iter().map(|id| ValidationIssue {
            scene: id.clone(),
            message: "unreachable from the start scene".to_string(),
            is_error: false,
        });
        invalid.chain(missing).chain(unreachable).collect()
    }
}

/// A warning or error found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The scene id where the issue was found.
    pub scene: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.scene, self.message)
    }
}

/// Validate a whole catalog.
pub fn validate(catalog: &SceneCatalog) -> ValidationReport {
    let mut report = ValidationReport::default();

    for root in [catalog.start(), catalog.default_scene()] {
        if !catalog.resolves(root)
            && !report
                .missing_targets
                .iter()
                .any(|m| m.scene.is_none() && m.target == root)
        {
            report.missing_targets.push(MissingTarget {
                scene: None,
                choice: None,
                target: root.to_string(),
            });
        }
    }

    for (id, scene) in catalog.iter() {
        if id == FALLBACK_SCENE_ID {
            report
                .invalid_scenes
                .push(invalid(id, "scene id is reserved for the fallback scene"));
        }
        if scene.title.trim().is_empty() {
            report.invalid_scenes.push(invalid(id, "title is empty"));
        }
        if scene.description.is_blank() {
            report.invalid_scenes.push(invalid(id, "description is empty"));
        }
        if scene.choices.is_empty() {
            report.invalid_scenes.push(invalid(id, "scene has no choices"));
        }

        for (index, choice) in scene.choices.iter().enumerate() {
            if choice.text.trim().is_empty() {
                report
                    .invalid_scenes
                    .push(invalid(id, &format!("choice {} has no text", index + 1)));
            }
            if !choice.has_trigger() {
                report
                    .invalid_scenes
                    .push(invalid(id, &format!("choice {} does nothing", index + 1)));
            }
            for target in choice.targets() {
                if !catalog.resolves(target) {
                    report.missing_targets.push(MissingTarget {
                        scene: Some(id.to_string()),
                        choice: Some(index),
                        target: target.to_string(),
                    });
                }
            }
        }
    }

    let reachable = reachable_from(catalog, &[catalog.start(), catalog.default_scene()]);
    report.unreachable = catalog
        .iter()
        .map(|(id, _)| id)
        .filter(|id| !reachable.contains(id))
        .map(str::to_string)
        .collect();

    if report.is_clean() {
        tracing::debug!(scenes = catalog.len(), "catalog validated clean");
    } else {
        tracing::warn!(
            invalid = report.invalid_scenes.len(),
            missing = report.missing_targets.len(),
            unreachable = report.unreachable.len(),
            "catalog has integrity issues"
        );
    }

    report
}

fn invalid(scene: &str, message: &str) -> InvalidScene {
    InvalidScene {
        scene: scene.to_string(),
        message: message.to_string(),
    }
}

/// Breadth-first walk over choice targets.
fn reachable_from<'a>(catalog: &'a SceneCatalog, roots: &[&'a str]) -> BTreeSet<&'a str> {
    let mut seen = BTreeSet::new();
    let mut queue: VecDeque<&str> = roots.iter().copied().collect();

    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        if let Some(scene) = catalog.get(id) {
            for choice in &scene.choices {
                queue.extend(choice.targets().filter(|t| !seen.contains(t)));
            }
        }
    }
    seen
}
