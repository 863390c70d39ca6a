use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::UnitId;
use crate::unit::Unit;

/// Lifecycle state of one per-unit collection job.
///
/// Transitions are strictly forward: `Pending -> Running -> Succeeded|Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// Opaque handle to whatever artifact a collection produced (path, URI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputRef(pub String);

impl OutputRef {
    pub fn new(raw: impl Into<String>) -> Self {
        OutputRef(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OutputRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome record for one unit. Owned by the worker processing the unit
/// until it reaches a terminal status, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub unit_id: UnitId,
    pub unit_name: String,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock seconds from start to terminal transition. Stamped when
    /// the job finishes so the serialized record carries it directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobResult {
    pub fn pending(unit: &Unit) -> Self {
        JobResult {
            unit_id: unit.id.clone(),
            unit_name: unit.name.clone(),
            status: JobStatus::Pending,
            output: None,
            error: None,
            duration_seconds: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Move to `Running`, stamping the start time.
    pub fn start(&mut self) -> Result<()> {
        self.transition(JobStatus::Running)?;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// Terminal success with the produced artifact handle.
    pub fn succeed(&mut self, output: OutputRef) -> Result<()> {
        self.transition(JobStatus::Succeeded)?;
        self.output = Some(output);
        self.finished_at = Some(Utc::now());
        self.duration_seconds = self.elapsed_seconds();
        Ok(())
    }

    /// Terminal failure with the surfaced error text.
    pub fn fail(&mut self, error: impl Into<String>) -> Result<()> {
        self.transition(JobStatus::Failed)?;
        self.error = Some(error.into());
        self.finished_at = Some(Utc::now());
        self.duration_seconds = self.elapsed_seconds();
        Ok(())
    }

    fn elapsed_seconds(&self) -> Option<f64> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => {
                Some((end - start).num_milliseconds() as f64 / 1000.0)
            }
            _ => None,
        }
    }

    fn transition(&mut self, to: JobStatus) -> Result<()> {
        let allowed = matches!(
            (self.status, to),
            (JobStatus::Pending, JobStatus::Running)
                | (JobStatus::Running, JobStatus::Succeeded)
                | (JobStatus::Running, JobStatus::Failed)
        );
        if !allowed {
            return Err(ModelError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
