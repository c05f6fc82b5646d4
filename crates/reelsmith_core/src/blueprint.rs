//! Blueprint type and structural validation.

use crate::Scene;
use reelsmith_error::{ProductionError, ProductionErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ordered collection of scenes for one topic.
///
/// Scene order is the final playback order. The pipeline never mutates a
/// blueprint; it only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Blueprint {
    /// Topic identifier, used for directory and file names
    topic_id: String,
    /// Human-readable title
    title: String,
    /// Scenes in playback order
    scenes: Vec<Scene>,
}

impl Blueprint {
    /// Create a blueprint.
    pub fn new(topic_id: impl Into<String>, title: impl Into<String>, scenes: Vec<Scene>) -> Self {
        Self {
            topic_id: topic_id.into(),
            title: title.into(),
            scenes,
        }
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the blueprint has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Check the structural invariants.
    ///
    /// The topic id must be a usable path component, and scene ids must be
    /// unique and dense from 1 to N.
    ///
    /// # Errors
    ///
    /// Returns [`ProductionErrorKind::InvalidBlueprint`] naming the first
    /// violation found.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_core::{Blueprint, Scene};
    ///
    /// let scene = |id: u32| {
    ///     Scene::builder().id(id).narration("n").visual_prompt("v").build().unwrap()
    /// };
    ///
    /// assert!(Blueprint::new("t", "T", vec![scene(2), scene(1)]).validate().is_ok());
    /// assert!(Blueprint::new("t", "T", vec![scene(1), scene(3)]).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ProductionError> {
        let invalid =
            |msg: String| Err(ProductionError::new(ProductionErrorKind::InvalidBlueprint(msg)));

        if self.topic_id.trim().is_empty() {
            return invalid("topic_id is empty".to_string());
        }
        if self.topic_id.contains(['/', '\\']) || self.topic_id == "." || self.topic_id == ".." {
            return invalid(format!("topic_id '{}' is not a valid directory name", self.topic_id));
        }
        if self.scenes.is_empty() {
            return invalid("blueprint has no scenes".to_string());
        }

        let mut seen = BTreeSet::new();
        for scene in &self.scenes {
            if !seen.insert(*scene.id()) {
                return invalid(format!("duplicate scene id {}", scene.id()));
            }
        }

        let expected = 1..=self.scenes.len() as u32;
        if !seen.iter().copied().eq(expected) {
            return invalid(format!(
                "scene ids must be dense from 1 to {}, got {:?}",
                self.scenes.len(),
                seen
            ));
        }

        Ok(())
    }
}
