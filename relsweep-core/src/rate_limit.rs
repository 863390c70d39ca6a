//! Shared fixed-interval gate for outbound collection calls.
//!
//! The quota-limited API budgets requests per minute across the whole run,
//! so the gate enforces a strict one-call-per-interval discipline shared by
//! every worker: no token bucket, no burst allowance.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

/// Gate enforcing a minimum spacing between outbound calls.
///
/// The last-call timestamp lives behind one async mutex and the lock is held
/// across the wait, so the spacing holds pairwise across all concurrent
/// workers regardless of who acquires next.
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(max_requests_per_minute: u32) -> Self {
        let per_minute = max_requests_per_minute.max(1);
        RateGate {
            min_interval: Duration::from_millis(60_000 / u64::from(per_minute)),
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Block until the fixed interval since the previous call has elapsed,
    /// then stamp the slot and let the caller proceed.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                trace!(wait_ms = wait.as_millis() as u64, "rate gate pausing");
                tokio::time::sleep(wait).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}
