//! Scene types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Narrative section a scene belongs to.
///
/// The set is open: unknown labels are kept verbatim as [`Section::Other`].
///
/// # Examples
///
/// ```
/// use reelsmith_core::Section;
///
/// assert_eq!(Section::from("intro".to_string()), Section::Intro);
/// assert_eq!(Section::from("Recap".to_string()), Section::Other("Recap".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display)]
#[serde(from = "String", into = "String")]
pub enum Section {
    /// Opening scene
    #[display("Intro")]
    Intro,
    /// Main content
    #[default]
    #[display("Body")]
    Body,
    /// Closing scene
    #[display("Outro")]
    Outro,
    /// Any other label
    #[display("{}", _0)]
    Other(String),
}

impl From<String> for Section {
    fn from(label: String) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "intro" => Self::Intro,
            "body" => Self::Body,
            "outro" => Self::Outro,
            _ => Self::Other(label),
        }
    }
}

impl From<Section> for String {
    fn from(section: Section) -> Self {
        section.to_string()
    }
}

/// One ordered unit of a blueprint.
///
/// Scenes are immutable once built; the id defines canonical ordering.
///
/// # Examples
///
/// ```
/// use reelsmith_core::{Scene, Section};
///
/// let scene = Scene::builder()
///     .id(1u32)
///     .section(Section::Intro)
///     .narration("Octopuses have three hearts.")
///     .visual_prompt("an octopus drifting over a reef")
///     .build()
///     .unwrap();
///
/// assert_eq!(*scene.id(), 1);
/// assert!(scene.keywords().is_empty());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct Scene {
    /// Positive id, dense from 1 within its blueprint
    id: u32,
    /// Section label
    #[builder(default)]
    #[serde(default)]
    section: Section,
    /// Text spoken over the scene
    narration: String,
    /// Prompt for the scene's still image
    visual_prompt: String,
    /// Free-form keywords
    #[builder(default)]
    #[serde(default)]
    keywords: BTreeSet<String>,
    /// Advisory duration in seconds
    #[builder(default)]
    #[serde(default)]
    estimated_duration: f64,
}

impl Scene {
    /// Create a scene builder.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }
}
