//! Filesystem layout for generated assets and final outputs.
//!
//! ```text
//! {asset_dir}/
//! └── {topic_id}/
//!     ├── images/001.png
//!     ├── audio/001.wav
//!     └── clips/001.mp4      (assembly intermediates)
//! {output_dir}/
//! └── {topic_id}_final.mp4
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod layout;

pub use layout::{AssetLayout, OutputLayout, TopicDirs, file_size, remove_dir, scene_file_name};
