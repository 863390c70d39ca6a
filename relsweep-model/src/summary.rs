use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::job::JobResult;

/// Aggregated record of all per-unit outcomes for one orchestration run.
///
/// `results` is kept in unit enumeration order, never completion order, so
/// the serialized document is deterministic for a given set of outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub tenant_id: String,
    pub total_units: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<JobResult>,
}
