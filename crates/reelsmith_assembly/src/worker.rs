//! Single-slot execution context for render jobs.

use reelsmith_error::{AssemblyError, AssemblyErrorKind, AssemblyResult};
use std::sync::{Arc, OnceLock};
use tokio::sync::Semaphore;

static SHARED: OnceLock<RenderWorker> = OnceLock::new();

/// Runs blocking render jobs one at a time on Tokio's blocking pool.
///
/// Jobs never execute on the async worker threads, so encoding cannot starve
/// generation tasks. Clones share the same slot.
///
/// # Examples
///
/// ```
/// use reelsmith_assembly::RenderWorker;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let worker = RenderWorker::new();
/// let answer = worker.run(|| 6 * 7).await.unwrap();
/// assert_eq!(answer, 42);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RenderWorker {
    slot: Arc<Semaphore>,
}

impl Default for RenderWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderWorker {
    /// Create a worker with its own slot.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// The process-wide worker. Every assembler using it shares one slot.
    pub fn shared() -> Self {
        SHARED.get_or_init(Self::new).clone()
    }

    /// Whether a job is currently running.
    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }

    /// Wait for the slot, then run `job` on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyErrorKind::WorkerFailed`] if the job panics or the
    /// slot is closed.
    pub async fn run<F, T>(&self, job: F) -> AssemblyResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = self.slot.clone().acquire_owned().await.map_err(|e| {
            AssemblyError::new(AssemblyErrorKind::WorkerFailed(format!(
                "render slot unavailable: {}",
                e
            )))
        })?;

        // Blocking threads do not inherit the caller's subscriber.
        let dispatch = tracing::dispatcher::get_default(|current| current.clone());
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            tracing::dispatcher::with_default(&dispatch, job)
        })
        .await
        .map_err(|e| {
            AssemblyError::new(AssemblyErrorKind::WorkerFailed(format!(
                "render job did not complete: {}",
                e
            )))
        })
    }
}
