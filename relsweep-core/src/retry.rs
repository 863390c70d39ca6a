//! Retry policy for per-unit collection calls.
//!
//! Transient failures (throttling, 5xx-class unavailability, bare timeouts)
//! back off exponentially with jitter up to a cap; everything else
//! propagates immediately.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CollectError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first call.
    pub max_attempts: u32,
    /// Seed delay before the first retry (doubled each round).
    pub initial_delay_ms: u64,
    /// Ceiling for a single backoff delay.
    pub max_delay_ms: u64,
    /// Uniform jitter bounds added on each doubling.
    pub jitter_min_ms: u64,
    pub jitter_max_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay_ms: 1_000,
            max_delay_ms: 30_000,
            jitter_min_ms: 500,
            jitter_max_ms: 1_000,
        }
    }
}

impl RetryPolicy {
    /// `delay = min(delay * 2 + jitter, cap)`
    fn next_delay(&self, current: Duration) -> Duration {
        let jitter = if self.jitter_max_ms > self.jitter_min_ms {
            rand::rng().random_range(self.jitter_min_ms..=self.jitter_max_ms)
        } else {
            self.jitter_min_ms
        };
        let doubled = current
            .saturating_mul(2)
            .saturating_add(Duration::from_millis(jitter));
        doubled.min(Duration::from_millis(self.max_delay_ms))
    }
}

/// Run `op` under `policy`. Fatal errors propagate untouched; a transient
/// error that survives every attempt is surfaced as
/// [`CollectError::RetriesExhausted`] wrapping the last observed error.
pub async fn execute<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, CollectError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CollectError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = Duration::from_millis(policy.initial_delay_ms);

    for attempt in 1..=max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_transient() => return Err(err),
            Err(err) => {
                if attempt == max_attempts {
                    return Err(CollectError::RetriesExhausted {
                        attempts: max_attempts,
                        last: Box::new(err),
                    });
                }
                delay = policy.next_delay(delay);
                warn!(
                    attempt,
                    max_attempts,
                    backoff_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient collection failure, backing off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }

    unreachable!("retry loop returns on the final attempt")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn flaky(
        failures_before_success: u32,
    ) -> (Arc<AtomicU32>, impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<u32, CollectError>> + Send>>)
    {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let op = move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            Box::pin(async move {
                if n <= failures_before_success {
                    Err(CollectError::RateLimited)
                } else {
                    Ok(n)
                }
            })
                as std::pin::Pin<
                    Box<dyn Future<Output = Result<u32, CollectError>> + Send>,
                >
        };
        (calls, op)
    }

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 4,
            initial_delay_ms: 10,
            max_delay_ms: 100,
            jitter_min_ms: 1,
            jitter_max_ms: 2,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn transient_error_retries_until_success() {
        let (calls, op) = flaky(2);
        let result = execute(&policy(), op).await.unwrap();
        assert_eq!(result, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_error_is_never_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let result: Result<(), _> = execute(&policy(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err(CollectError::Auth("denied".into())) }
        })
        .await;
        assert!(matches!(result, Err(CollectError::Auth(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_surfaces_last_error() {
        let (calls, op) = flaky(100);
        let result = execute(&policy(), op).await;
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        match result {
            Err(CollectError::RetriesExhausted { attempts, last }) => {
                assert_eq!(attempts, 4);
                assert!(matches!(*last, CollectError::RateLimited));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn single_attempt_policy_does_not_retry() {
        let (calls, op) = flaky(100);
        let mut p = policy();
        p.max_attempts = 1;
        let result = execute(&p, op).await;
        assert!(matches!(
            result,
            Err(CollectError::RetriesExhausted { attempts: 1, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn backoff_is_capped() {
        let p = policy();
        let mut delay = Duration::from_millis(p.initial_delay_ms);
        for _ in 0..10 {
            delay = p.next_delay(delay);
            assert!(delay <= Duration::from_millis(p.max_delay_ms));
        }
        assert_eq!(delay, Duration::from_millis(p.max_delay_ms));
    }
}
