use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Global knobs that tune orchestrator behaviour.
///
/// All fields carry defaults so callers can adopt individual knobs without
/// supplying a full configuration payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Worker pool sizing.
    pub parallelism: ParallelismConfig,
    /// Outbound call pacing against the quota-limited collection API.
    pub rate_limiting: RateLimitConfig,
    /// Retry/backoff policy shared by all workers.
    pub retry: RetryPolicy,
    /// Per-attempt deadline for one unit's collection call (seconds).
    pub unit_timeout_secs: u64,
}

impl OrchestratorConfig {
    pub fn unit_timeout(&self) -> Duration {
        Duration::from_secs(self.unit_timeout_secs.max(1))
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelismConfig {
    /// When false, units are processed strictly sequentially.
    pub enabled: bool,
    /// Maximum worker concurrency. Valid range 1..=20.
    pub max_degree: usize,
}

impl Default for ParallelismConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_degree: 4,
        }
    }
}

impl ParallelismConfig {
    /// Effective pool size for a given unit count. Falls back to one worker
    /// when parallel execution is disabled or trivial.
    pub fn effective_degree(&self, unit_count: usize) -> usize {
        if !self.enabled || self.max_degree <= 1 || unit_count <= 1 {
            1
        } else {
            self.max_degree.min(unit_count)
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Extra pause a worker takes after finishing a unit, before claiming
    /// the next one. Independent of the shared rate gate.
    pub delay_between_units_ms: u64,
    /// Ceiling for outbound collection calls across the whole run.
    pub max_requests_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            delay_between_units_ms: 0,
            max_requests_per_minute: 60,
        }
    }
}

impl RateLimitConfig {
    pub fn delay_between_units(&self) -> Duration {
        Duration::from_millis(self.delay_between_units_ms)
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            parallelism: ParallelismConfig::default(),
            rate_limiting: RateLimitConfig::default(),
            retry: RetryPolicy::default(),
            unit_timeout_secs: 900,
        }
    }
}

/// Connection settings for the collection API provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Base URL of the assessment collection endpoint.
    pub base_url: String,
    /// Environment variable holding the bearer token. Session establishment
    /// itself happens outside this tool.
    pub token_env: String,
    /// Socket-level request timeout (seconds); distinct from the
    /// orchestrator's per-unit deadline.
    pub request_timeout_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token_env: "RELSWEEP_API_TOKEN".to_owned(),
            request_timeout_secs: 120,
        }
    }
}
