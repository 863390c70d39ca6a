//! Result aggregation: fold per-unit outcomes into one run summary.

use chrono::Utc;
use uuid::Uuid;

use relsweep_model::{JobResult, JobStatus, RunSummary};

/// Pure merge of per-unit results into a [`RunSummary`].
///
/// `results` arrives (and stays) in unit enumeration order, never completion
/// order, so the output is deterministic regardless of worker scheduling.
/// Writing the summary anywhere durable is the caller's concern.
pub fn aggregate(tenant_id: &str, results: Vec<JobResult>) -> RunSummary {
    let succeeded = results
        .iter()
        .filter(|r| r.status == JobStatus::Succeeded)
        .count();
    let failed = results
        .iter()
        .filter(|r| r.status == JobStatus::Failed)
        .count();

    RunSummary {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        tenant_id: tenant_id.to_owned(),
        total_units: results.len(),
        succeeded,
        failed,
        results,
    }
}
