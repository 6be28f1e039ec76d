//! Retry guard — bounded exponential backoff around a reasoning session.
//!
//! Wraps one full session invocation, not each atomic model call. Rate-limit
//! failures are retried with delays of base × 2^attempt (5 s, 10 s, 20 s, …);
//! every other failure class aborts immediately. This is the only place
//! failures become a retry schedule.

use std::future::Future;
use std::time::Duration;

use crate::error::Error;

/// Bounded exponential backoff policy for rate-limited sessions.
#[derive(Debug, Clone)]
pub struct RetryGuard {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryGuard {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay before retrying after the given zero-based attempt.
    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.pow(attempt)
    }

    /// Run `op` until it succeeds, fails non-transiently, or exhausts the
    /// attempt budget. Returns `None` in both terminal failure cases; the
    /// error never propagates past this wrapper.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        for attempt in 0..self.max_attempts {
            match op().await {
                Ok(value) => return Some(value),
                Err(err) if err.is_rate_limited() => {
                    let wait = self.delay_for(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        wait_secs = wait.as_secs(),
                        "Rate limit hit, backing off before retry"
                    );
                    tokio::time::sleep(wait).await;
                }
                Err(err) => {
                    tracing::error!("Session failed: {}", err);
                    return None;
                }
            }
        }
        tracing::error!(
            max_attempts = self.max_attempts,
            "Maximum retries reached, giving up"
        );
        None
    }
}

impl Default for RetryGuard {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn rate_limited() -> Error {
        Error::Llm(LlmError::RateLimited {
            provider: "test".to_string(),
            retry_after: None,
        })
    }

    fn hard_failure() -> Error {
        Error::Llm(LlmError::InvalidResponse {
            provider: "test".to_string(),
            reason: "garbage".to_string(),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_sequence_is_5_10_20() {
        let guard = RetryGuard::default();
        let attempts = Arc::new(AtomicU32::new(0));
        let waits = Arc::new(tokio::sync::Mutex::new(Vec::new()));
        let start = Instant::now();

        let result = guard
            .run(|| {
                let attempts = Arc::clone(&attempts);
                let waits = Arc::clone(&waits);
                async move {
                    waits.lock().await.push(start.elapsed());
                    let n = attempts.fetch_add(1, Ordering::SeqCst);
                    if n < 3 { Err(rate_limited()) } else { Ok(n) }
                }
            })
            .await;

        // 3 transient failures, success on the 4th attempt.
        assert_eq!(result, Some(3));
        let waits = waits.lock().await;
        assert_eq!(waits.len(), 4);
        assert_eq!(waits[0], Duration::from_secs(0));
        assert_eq!(waits[1], Duration::from_secs(5));
        assert_eq!(waits[2], Duration::from_secs(15)); // 5 + 10
        assert_eq!(waits[3], Duration::from_secs(35)); // 5 + 10 + 20
    }

    #[tokio::test(start_paused = true)]
    async fn exhausting_retries_returns_none() {
        let guard = RetryGuard::new(5, Duration::from_secs(5));
        let attempts = Arc::new(AtomicU32::new(0));

        let result: Option<u32> = guard
            .run(|| {
                let attempts = Arc::clone(&attempts);
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(rate_limited())
                }
            })
            .await;

        assert!(result.is_none());
        assert_eq!(attempts.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn non_transient_failure_aborts_immediately() {
        let guard = RetryGuard::default();
        let attempts = Arc::new(AtomicU32::new(0));

        let result: Option<u32> = guard
            .run(|| {
                let attempts = Arc::clone(&attempts);
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(hard_failure())
                }
            })
            .await;

        assert!(result.is_none());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn success_on_first_attempt_skips_backoff() {
        let guard = RetryGuard::default();
        let result = guard.run(|| async { Ok::<_, Error>(42) }).await;
        assert_eq!(result, Some(42));
    }
}
