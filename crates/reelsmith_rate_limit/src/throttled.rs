//! Backend decorator applying a [`RateLimiter`].

use crate::RateLimiter;
use async_trait::async_trait;
use reelsmith_core::NarrationConfig;
use reelsmith_error::GenerationResult;
use reelsmith_interface::{ImageGenerator, VoiceSynthesizer};
use std::path::{Path, PathBuf};

/// Wraps a backend so every call first acquires from a [`RateLimiter`].
///
/// Retries go through the wrapper too, so each attempt counts against the
/// quota.
#[derive(Debug, Clone)]
pub struct Throttled<S> {
    inner: S,
    limiter: RateLimiter,
}

impl<S> Throttled<S> {
    /// Throttle `inner` with `limiter`.
    pub fn new(inner: S, limiter: RateLimiter) -> Self {
        Self { inner, limiter }
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: ImageGenerator> ImageGenerator for Throttled<S> {
    async fn generate(&self, prompt: &str, destination: &Path) -> GenerationResult<PathBuf> {
        let _guard = self.limiter.acquire().await;
        self.inner.generate(prompt, destination).await
    }

    fn file_extension(&self) -> &'static str {
        self.inner.file_extension()
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl<S: VoiceSynthesizer> VoiceSynthesizer for Throttled<S> {
    async fn generate(
        &self,
        text: &str,
        destination: &Path,
        voice: &NarrationConfig,
    ) -> GenerationResult<f64> {
        let _guard = self.limiter.acquire().await;
        self.inner.generate(text, destination, voice).await
    }

    fn file_extension(&self) -> &'static str {
        self.inner.file_extension()
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}
