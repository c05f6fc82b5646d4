//! Image and voice generation backends.
//!
//! - [`OpenAiImageGenerator`] / [`OpenAiVoiceSynthesizer`] talk to an
//!   OpenAI-compatible HTTP API.
//! - [`MockImageGenerator`] / [`MockVoiceSynthesizer`] are deterministic
//!   offline doubles that still write real PNG and WAV files.
//!
//! [`ProviderFactory`] picks one of each from [`ProviderSettings`] at startup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod factory;
mod mock;
mod openai;

pub use factory::{ProviderFactory, ProviderKind, ProviderSettings};
pub use mock::{MockImageGenerator, MockVoiceSynthesizer, estimate_narration_seconds};
pub use openai::{OPENAI_API_KEY_VAR, OpenAiImageGenerator, OpenAiVoiceSynthesizer};
