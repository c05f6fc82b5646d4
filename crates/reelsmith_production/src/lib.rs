//! Concurrent asset production.
//!
//! [`ContentProducer`] fans out one [`SceneAssetTask`] per scene, waits for
//! every task to finish without cancelling siblings, and partitions the
//! outcomes into a [`ProductionManifest`](reelsmith_core::ProductionManifest)
//! of surviving assets plus a list of [`SceneFailure`]s.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod outcome;
mod producer;
mod task;

pub use outcome::{FailureCause, ProductionReport, SceneFailure, SceneOutcome};
pub use producer::{ContentProducer, ContentProducerBuilder};
pub use task::SceneAssetTask;
