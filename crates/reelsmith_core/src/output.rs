//! Final output descriptor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The rendered video handed downstream.
///
/// `duration` is the sum of the input manifest's per-asset durations,
/// including assets whose clip was skipped. It is not a measurement of the
/// encoded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct VideoOutput {
    /// Topic identifier
    topic_id: String,
    /// Encoded file location
    file_path: PathBuf,
    /// Aggregated duration in seconds
    duration: f64,
    /// Size of the written file
    file_size_bytes: u64,
    /// When assembly finished
    created_at: DateTime<Utc>,
}

impl VideoOutput {
    /// Create an output descriptor stamped with the current time.
    pub fn new(
        topic_id: impl Into<String>,
        file_path: impl Into<PathBuf>,
        duration: f64,
        file_size_bytes: u64,
    ) -> Self {
        Self {
            topic_id: topic_id.into(),
            file_path: file_path.into(),
            duration,
            file_size_bytes,
            created_at: Utc::now(),
        }
    }

    /// File size in mebibytes.
    pub fn file_size_mb(&self) -> f64 {
        self.file_size_bytes as f64 / (1024.0 * 1024.0)
    }
}
