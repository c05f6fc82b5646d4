//! Directory preparation and path construction.

use reelsmith_error::{StorageError, StorageErrorKind, StorageResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name for a scene's asset: zero-padded id plus extension.
///
/// # Examples
///
/// ```
/// assert_eq!(reelsmith_storage::scene_file_name(7, "png"), "007.png");
/// assert_eq!(reelsmith_storage::scene_file_name(1234, "wav"), "1234.wav");
/// ```
pub fn scene_file_name(scene_id: u32, extension: &str) -> String {
    format!("{:03}.{}", scene_id, extension)
}

/// Root of all per-topic asset directories.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct AssetLayout {
    /// Directory holding one subdirectory per topic
    base_dir: PathBuf,
}

impl AssetLayout {
    /// Create a layout rooted at `base_dir`. Nothing is created yet.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directories for `topic_id`, without touching the filesystem.
    pub fn topic(&self, topic_id: &str) -> TopicDirs {
        TopicDirs::at(self.base_dir.join(topic_id))
    }

    /// Create the topic, image, and audio directories.
    ///
    /// Safe to call when they already exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::DirectoryCreation`] if any directory cannot
    /// be created.
    #[tracing::instrument(skip(self), fields(base_dir = %self.base_dir.display()))]
    pub async fn prepare(&self, topic_id: &str) -> StorageResult<TopicDirs> {
        let dirs = self.topic(topic_id);
        create_dir(&dirs.images).await?;
        create_dir(&dirs.audio).await?;
        tracing::debug!(root = %dirs.root.display(), "Prepared topic directories");
        Ok(dirs)
    }
}

/// Directories belonging to one topic.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct TopicDirs {
    /// `{asset_dir}/{topic_id}`
    root: PathBuf,
    /// Generated images
    images: PathBuf,
    /// Generated narration
    audio: PathBuf,
}

impl TopicDirs {
    /// Directories under an existing topic root.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            images: root.join("images"),
            audio: root.join("audio"),
            root,
        }
    }

    /// Destination of a scene's image.
    pub fn image_path(&self, scene_id: u32, extension: &str) -> PathBuf {
        self.images.join(scene_file_name(scene_id, extension))
    }

    /// Destination of a scene's narration.
    pub fn audio_path(&self, scene_id: u32, extension: &str) -> PathBuf {
        self.audio.join(scene_file_name(scene_id, extension))
    }

    /// Scratch directory for per-scene clips during assembly.
    pub fn clips_dir(&self) -> PathBuf {
        self.root.join("clips")
    }
}

/// Location of final rendered files.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct OutputLayout {
    /// Directory receiving `{topic_id}_final.{container}`
    output_dir: PathBuf,
}

impl OutputLayout {
    /// Create an output layout. Nothing is created yet.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path of the final file for `topic_id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_storage::OutputLayout;
    /// use std::path::Path;
    ///
    /// let layout = OutputLayout::new("/videos");
    /// assert_eq!(layout.final_path("octopus", "mp4"), Path::new("/videos/octopus_final.mp4"));
    /// ```
    pub fn final_path(&self, topic_id: &str, container: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_final.{}", topic_id, container))
    }

    /// Create the output directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::DirectoryCreation`] on failure.
    pub async fn prepare(&self) -> StorageResult<()> {
        create_dir(&self.output_dir).await
    }
}

async fn create_dir(path: &Path) -> StorageResult<()> {
    tokio::fs::create_dir_all(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryCreation(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })
}

/// Size in bytes of the file at `path`.
///
/// # Errors
///
/// Returns [`StorageErrorKind::NotFound`] when nothing exists at `path`, and
/// [`StorageErrorKind::FileRead`] for other metadata failures.
pub async fn file_size(path: &Path) -> StorageResult<u64> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.len()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::new(
            StorageErrorKind::NotFound(path.display().to_string()),
        )),
        Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))),
    }
}

/// Remove a directory tree. A missing directory counts as removed.
///
/// # Errors
///
/// Returns [`StorageErrorKind::Removal`] if the tree exists but cannot be
/// removed.
pub async fn remove_dir(path: &Path) -> StorageResult<()> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StorageError::new(StorageErrorKind::Removal(format!(
            "{}: {}",
            path.display(),
            e
        )))),
    }
}
