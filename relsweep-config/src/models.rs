use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use relsweep_core::{CollectorConfig, OrchestratorConfig};
use relsweep_model::FilterCriteria;

/// Top-level assessment settings. These tune which units a run covers and
/// how hard it leans on the quota-limited collection API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Tenant whose units are enumerated and assessed.
    pub tenant_id: String,
    /// Directory receiving the run summary document.
    pub output_dir: PathBuf,
    /// Unit scoping rules applied after enumeration.
    pub filters: FilterCriteria,
    /// Worker pool sizing, pacing, retry, and deadline tuning.
    pub orchestrator: OrchestratorConfig,
    /// Collection API connection settings.
    pub collector: CollectorConfig,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            tenant_id: String::new(),
            output_dir: PathBuf::from("./out"),
            filters: FilterCriteria::default(),
            orchestrator: OrchestratorConfig::default(),
            collector: CollectorConfig::default(),
        }
    }
}
