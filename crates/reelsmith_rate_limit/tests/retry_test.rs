use reelsmith_error::{GenerationError, GenerationErrorKind};
use reelsmith_rate_limit::{RetryConfig, RetryPolicy};
use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn failure(attempt: u32) -> GenerationError {
    GenerationError::new(GenerationErrorKind::Http(format!("attempt {attempt} failed")))
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_first_success_invokes_once() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new(3, Duration::ZERO);

    let result: Result<&str, GenerationError> = policy
        .run("image", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok("done")
        })
        .await;

    assert_eq!(result.unwrap(), "done");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_success_on_kth_attempt_invokes_exactly_k_times() {
    for k in 1..=3u32 {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result = policy
            .run("voice", || async {
                let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < k { Err(failure(attempt)) } else { Ok(attempt) }
            })
            .await;

        assert_eq!(result.unwrap(), k);
        assert_eq!(calls.load(Ordering::SeqCst), k);
    }
}

#[tokio::test]
async fn test_exhaustion_returns_last_error_unchanged() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new(3, Duration::ZERO);

    let err = policy
        .run("image", || async {
            let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err::<(), _>(failure(attempt))
        })
        .await
        .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        err.kind,
        GenerationErrorKind::Http("attempt 3 failed".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_backoff_is_linear_and_skips_sleep_after_last_attempt() {
    let policy = RetryPolicy::new(3, Duration::from_secs(2));
    let started = tokio::time::Instant::now();

    let result = policy
        .run("image", || async { Err::<(), _>(failure(0)) })
        .await;

    let elapsed = started.elapsed();
    assert!(result.is_err());
    // 2s after the first failure, 4s after the second, nothing after the third.
    assert!(elapsed >= Duration::from_secs(6), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(7), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn test_zero_attempts_still_invokes_once() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new(0, Duration::ZERO);
    assert_eq!(*policy.max_attempts(), 1);

    let _ = policy
        .run("image", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(failure(1))
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_wrapped_operation_keeps_the_same_contract() {
    let calls = AtomicU32::new(0);
    let wrapped = RetryPolicy::new(2, Duration::ZERO).wrap("flaky", || async {
        let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == 1 { Err(failure(attempt)) } else { Ok(attempt) }
    });

    assert_eq!(wrapped.call().await.unwrap(), 2);
    assert_eq!(*wrapped.policy().max_attempts(), 2);
}

#[tokio::test]
async fn test_each_failed_attempt_is_logged() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let _ = RetryPolicy::new(2, Duration::ZERO)
        .run("image", || async { Err::<(), _>(failure(9)) })
        .await;

    let output = logs.contents();
    assert_eq!(output.matches("Attempt failed").count(), 2);
    assert!(output.contains("attempt=1"));
    assert!(output.contains("attempt=2"));
    assert!(output.contains("max_attempts=2"));
    assert!(output.contains("operation=\"image\""));
}

#[test]
fn test_retry_config_builds_policy() {
    let config = RetryConfig::default();
    assert_eq!(config.policy(), RetryPolicy::default());

    let policy = RetryConfig::new(5, 250).policy();
    assert_eq!(*policy.max_attempts(), 5);
    assert_eq!(*policy.base_delay(), Duration::from_millis(250));
    assert_eq!(policy.delays().last(), Some(Duration::from_millis(1000)));
}
