//! Capability traits for the external generation services.
//!
//! Production only ever talks to backends through these traits. Concrete
//! backends (network-backed or deterministic test doubles) are chosen once at
//! startup and handed over as trait objects.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageGenerator, VoiceSynthesizer};
