//! Orchestration core for relsweep.
//!
//! The pipeline: candidate units flow through the filter engine and the
//! resume tracker, then the bounded worker pool processes each survivor
//! behind the shared rate gate and the retry policy, and the aggregator
//! folds the per-unit outcomes into one [`relsweep_model::RunSummary`].

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod orchestrator;
pub mod providers;
pub mod rate_limit;
pub mod resume;
pub mod retry;

pub use aggregate::aggregate;
pub use config::{
    CollectorConfig, OrchestratorConfig, ParallelismConfig, RateLimitConfig,
};
pub use error::{CollectError, EnumerationError, OrchestratorError};
pub use filter::{is_in_scope, select_units, validate_criteria};
pub use orchestrator::Orchestrator;
pub use providers::{CollectContext, HttpProvider, UnitCollector, UnitSource};
pub use rate_limit::RateGate;
pub use resume::ResumeTracker;
pub use retry::RetryPolicy;
