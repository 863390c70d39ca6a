//! Bounded worker pool running one collection job per unit.
//!
//! Workers claim units from a shared cursor in enumeration order, wrap the
//! external collection call with the shared rate gate, a per-attempt
//! deadline, and the retry policy, and record terminal outcomes into
//! enumeration-ordered result slots. A failed unit never halts its siblings;
//! only enumeration- and configuration-time errors abort a run.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use relsweep_model::{JobResult, Unit};

use crate::config::OrchestratorConfig;
use crate::error::CollectError;
use crate::providers::{CollectContext, UnitCollector};
use crate::rate_limit::RateGate;
use crate::retry;

/// Cross-worker progress counters, updated only under the run-state lock.
#[derive(Clone, Copy, Debug, Default)]
pub struct Progress {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Shared mutable state of one run: the claim cursor, the progress counters,
/// and the enumeration-ordered result slots. Everything lives behind a
/// single mutex so every update is a plain locked read-modify-write.
#[derive(Debug)]
struct RunState {
    next: usize,
    progress: Progress,
    results: Vec<JobResult>,
}

/// Tenant-wide assessment orchestrator.
pub struct Orchestrator {
    config: OrchestratorConfig,
    collector: Arc<dyn UnitCollector>,
    gate: Arc<RateGate>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    pub fn new(
        config: OrchestratorConfig,
        collector: Arc<dyn UnitCollector>,
    ) -> Self {
        let gate = Arc::new(RateGate::new(
            config.rate_limiting.max_requests_per_minute,
        ));
        Orchestrator {
            config,
            collector,
            gate,
            cancel: CancellationToken::new(),
        }
    }

    /// Token observers can trigger to stop the run early. Cancellation stops
    /// claiming new units; in-flight units run to completion and appear in
    /// the final results.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Process the selected units and return one result per unit, in
    /// enumeration order. Units never claimed (cancelled run) stay Pending.
    pub async fn run(&self, units: Vec<Unit>) -> Vec<JobResult> {
        let results: Vec<JobResult> =
            units.iter().map(JobResult::pending).collect();
        if units.is_empty() {
            return results;
        }

        let degree = self.config.parallelism.effective_degree(units.len());
        info!(
            units = units.len(),
            workers = degree,
            rate_interval_ms = self.gate.min_interval().as_millis() as u64,
            "starting assessment run"
        );

        let units = Arc::new(units);
        let state = Arc::new(Mutex::new(RunState {
            next: 0,
            progress: Progress::default(),
            results,
        }));

        if degree == 1 {
            self.clone_for_worker()
                .worker_loop(0, Arc::clone(&units), Arc::clone(&state))
                .await;
        } else {
            let mut handles = Vec::with_capacity(degree);
            for worker in 0..degree {
                let orchestrator = self.clone_for_worker();
                let units = Arc::clone(&units);
                let state = Arc::clone(&state);
                handles.push(tokio::spawn(async move {
                    orchestrator.worker_loop(worker, units, state).await;
                }));
            }
            for handle in handles {
                if let Err(err) = handle.await {
                    error!(error = %err, "assessment worker panicked");
                }
            }
        }

        let state = state.lock().await;
        let progress = state.progress;
        info!(
            processed = progress.processed,
            succeeded = progress.succeeded,
            failed = progress.failed,
            cancelled = self.cancel.is_cancelled(),
            "assessment run finished"
        );
        state.results.clone()
    }

    fn clone_for_worker(&self) -> WorkerHandle {
        WorkerHandle {
            config: self.config.clone(),
            collector: Arc::clone(&self.collector),
            gate: Arc::clone(&self.gate),
            cancel: self.cancel.clone(),
        }
    }
}

/// Per-worker view of the orchestrator's shared services.
struct WorkerHandle {
    config: OrchestratorConfig,
    collector: Arc<dyn UnitCollector>,
    gate: Arc<RateGate>,
    cancel: CancellationToken,
}

impl WorkerHandle {
    async fn worker_loop(
        &self,
        worker: usize,
        units: Arc<Vec<Unit>>,
        state: Arc<Mutex<RunState>>,
    ) {
        loop {
            if self.cancel.is_cancelled() {
                info!(worker, "worker stopping: run cancelled");
                break;
            }

            let claimed = {
                let mut state = state.lock().await;
                if state.next >= units.len() {
                    None
                } else {
                    let index = state.next;
                    state.next += 1;
                    if let Err(err) = state.results[index].start() {
                        warn!(worker, index, error = %err, "stale result slot");
                    }
                    Some(index)
                }
            };
            let Some(index) = claimed else {
                break;
            };
            let unit = &units[index];
            debug!(worker, unit = %unit.id, "unit claimed");

            let outcome = self.process_unit(unit).await;

            {
                let mut state = state.lock().await;
                let slot = &mut state.results[index];
                let transition = match outcome {
                    Ok(output) => {
                        info!(worker, unit = %unit.id, output = %output, "unit succeeded");
                        slot.succeed(output)
                    }
                    Err(err) => {
                        warn!(worker, unit = %unit.id, error = %err, "unit failed");
                        slot.fail(err.to_string())
                    }
                };
                if let Err(err) = transition {
                    error!(worker, unit = %unit.id, error = %err, "result slot corrupted");
                }
                state.progress.processed += 1;
                match state.results[index].status {
                    relsweep_model::JobStatus::Succeeded => {
                        state.progress.succeeded += 1;
                    }
                    _ => state.progress.failed += 1,
                }
            }

            let pacing = self.config.rate_limiting.delay_between_units();
            if !pacing.is_zero() && !self.cancel.is_cancelled() {
                tokio::time::sleep(pacing).await;
            }
        }
    }

    /// One unit end to end: scratch workspace, rate gate, per-attempt
    /// deadline, and the retry policy around the external collection call.
    /// The scratch workspace is dropped on every exit path.
    async fn process_unit(
        &self,
        unit: &Unit,
    ) -> Result<relsweep_model::OutputRef, CollectError> {
        let ctx = CollectContext::for_unit(unit)?;
        let deadline = self.config.unit_timeout();

        retry::execute(&self.config.retry, || {
            let ctx = &ctx;
            async move {
                self.gate.acquire().await;
                match tokio::time::timeout(
                    deadline,
                    self.collector.collect(unit, ctx),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(CollectError::Timeout(deadline)),
                }
            }
        })
        .await
    }
}
