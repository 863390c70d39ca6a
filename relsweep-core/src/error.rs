use std::time::Duration;

use thiserror::Error;

/// Failure modes of a single unit's collection call.
///
/// The transient variants participate in the retry policy; everything else
/// is terminal for the unit (but never for the run).
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("rate limited by collection endpoint")]
    RateLimited,

    #[error("collection endpoint unavailable: {0}")]
    Unavailable(String),

    #[error("collection timed out after {0:?}")]
    Timeout(Duration),

    #[error("authorization failed: {0}")]
    Auth(String),

    #[error("invalid collection request: {0}")]
    InvalidRequest(String),

    #[error("unit not found: {0}")]
    NotFound(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("scratch workspace error: {0}")]
    Scratch(#[from] std::io::Error),

    #[error("retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<CollectError>,
    },
}

impl CollectError {
    /// Throttling, 5xx-class unavailability, and bare timeouts are worth
    /// retrying; authorization, validation, and not-found errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            CollectError::RateLimited
            | CollectError::Unavailable(_)
            | CollectError::Timeout(_) => true,
            CollectError::Network(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}

/// Failure enumerating the tenant's units. Always fatal to the whole run,
/// before any unit is processed.
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("network failure listing units: {0}")]
    Network(String),
}

/// Run-level failures. Per-unit errors never surface here; they are recorded
/// in the corresponding [`relsweep_model::JobResult`] instead.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("unit enumeration failed: {0}")]
    Enumeration(#[from] EnumerationError),

    #[error("invalid filter criteria: {0}")]
    FilterConfig(String),
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(CollectError::RateLimited.is_transient());
        assert!(CollectError::Unavailable("503".into()).is_transient());
        assert!(
            CollectError::Timeout(Duration::from_secs(1)).is_transient()
        );
        assert!(!CollectError::Auth("denied".into()).is_transient());
        assert!(!CollectError::NotFound("sub-9".into()).is_transient());
        assert!(!CollectError::InvalidRequest("bad".into()).is_transient());
    }
}
