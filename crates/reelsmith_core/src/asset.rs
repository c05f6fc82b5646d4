//! Production results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The image and audio produced for one scene.
///
/// Only exists when both generations for the scene succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AssetPath {
    /// Scene this asset belongs to
    scene_id: u32,
    /// Generated image file
    image_path: PathBuf,
    /// Generated narration file
    audio_path: PathBuf,
    /// Narration length in seconds, as reported by the voice backend
    duration: f64,
}

impl AssetPath {
    /// Create an asset record.
    pub fn new(
        scene_id: u32,
        image_path: impl Into<PathBuf>,
        audio_path: impl Into<PathBuf>,
        duration: f64,
    ) -> Self {
        Self {
            scene_id,
            image_path: image_path.into(),
            audio_path: audio_path.into(),
            duration,
        }
    }
}

/// Ordered, possibly partial set of produced assets for one blueprint.
///
/// Assets are always strictly ascending by scene id. Scenes that failed are
/// absent.
///
/// # Examples
///
/// ```
/// use reelsmith_core::{AssetPath, ProductionManifest};
///
/// let manifest = ProductionManifest::new(
///     "octopus",
///     "/tmp/assets/octopus",
///     vec![
///         AssetPath::new(3, "i3.png", "a3.wav", 2.0),
///         AssetPath::new(1, "i1.png", "a1.wav", 3.0),
///     ],
/// );
///
/// let ids: Vec<u32> = manifest.assets().iter().map(|a| *a.scene_id()).collect();
/// assert_eq!(ids, vec![1, 3]);
/// assert_eq!(manifest.total_duration(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(from = "RawManifest")]
pub struct ProductionManifest {
    /// Topic identifier
    topic_id: String,
    /// Per-topic asset directory
    base_dir: PathBuf,
    /// Assets in ascending scene order
    assets: Vec<AssetPath>,
    /// When the manifest was built
    created_at: DateTime<Utc>,
}

/// Manifest as read from JSON, before ordering is enforced.
#[derive(Deserialize)]
struct RawManifest {
    topic_id: String,
    base_dir: PathBuf,
    assets: Vec<AssetPath>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<RawManifest> for ProductionManifest {
    fn from(raw: RawManifest) -> Self {
        let mut manifest = Self::new(raw.topic_id, raw.base_dir, raw.assets);
        if let Some(created_at) = raw.created_at {
            manifest.created_at = created_at;
        }
        manifest
    }
}

fn normalize(assets: &mut Vec<AssetPath>) {
    assets.sort_by_key(|asset| asset.scene_id);
    assets.dedup_by_key(|asset| asset.scene_id);
}

impl ProductionManifest {
    /// Build a manifest, normalizing asset order by scene id.
    ///
    /// Deserialized manifests go through the same normalization.
    pub fn new(
        topic_id: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        mut assets: Vec<AssetPath>,
    ) -> Self {
        normalize(&mut assets);
        Self {
            topic_id: topic_id.into(),
            base_dir: base_dir.into(),
            assets,
            created_at: Utc::now(),
        }
    }

    /// Number of assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether no scene survived production.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Scene ids in manifest order.
    pub fn scene_ids(&self) -> Vec<u32> {
        self.assets.iter().map(|asset| asset.scene_id).collect()
    }

    /// Sum of all asset durations.
    pub fn total_duration(&self) -> f64 {
        self.assets.iter().map(|asset| asset.duration).sum()
    }

    /// Consume the manifest, yielding its assets in order.
    pub fn into_assets(self) -> Vec<AssetPath> {
        self.assets
    }
}
