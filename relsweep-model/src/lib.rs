//! Core data model definitions shared across relsweep crates.

pub mod error;
pub mod filter;
pub mod ids;
pub mod job;
pub mod summary;
pub mod tags;
pub mod unit;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use filter::FilterCriteria;
pub use ids::UnitId;
pub use job::{JobResult, JobStatus, OutputRef};
pub use summary::RunSummary;
pub use tags::Tags;
pub use unit::Unit;
