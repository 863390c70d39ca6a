//! Guard rails checked before a run is scheduled.

use relsweep_core::filter::validate_criteria;

use crate::loader::ConfigLoadError;
use crate::models::AssessmentConfig;

/// Valid worker pool range exposed on the CLI and in the config file.
pub const MAX_PARALLELISM: usize = 20;

pub fn validate(config: &AssessmentConfig) -> Result<(), ConfigLoadError> {
    if config.tenant_id.trim().is_empty() {
        return Err(guard_rail("tenant_id must not be empty"));
    }

    let degree = config.orchestrator.parallelism.max_degree;
    if degree == 0 || degree > MAX_PARALLELISM {
        return Err(guard_rail(format!(
            "parallelism.max_degree must be within 1..={MAX_PARALLELISM}, got {degree}"
        )));
    }

    let rpm = config.orchestrator.rate_limiting.max_requests_per_minute;
    if rpm == 0 {
        return Err(guard_rail(
            "rate_limiting.max_requests_per_minute must be at least 1",
        ));
    }

    if config.collector.base_url.trim().is_empty() {
        return Err(guard_rail("collector.base_url must not be empty"));
    }

    validate_criteria(&config.filters)
        .map_err(|err| guard_rail(err.to_string()))?;

    Ok(())
}

fn guard_rail(message: impl Into<String>) -> ConfigLoadError {
    ConfigLoadError::GuardRail(message.into())
}
