//! External collaborator contracts.
//!
//! The orchestrator never talks to the cloud control plane directly; it goes
//! through these traits so tests can substitute stubs and deployments can
//! swap the transport.

mod http;

use std::path::Path;

use async_trait::async_trait;
use tempfile::TempDir;

use relsweep_model::{OutputRef, Unit};

use crate::error::{CollectError, EnumerationError};

pub use http::HttpProvider;

/// Enumerates the tenant's candidate units. A failure here is fatal to the
/// whole run, before any unit is processed.
#[async_trait]
pub trait UnitSource: Send + Sync {
    async fn list_units(
        &self,
        tenant_id: &str,
    ) -> Result<Vec<Unit>, EnumerationError>;
}

/// Performs the per-unit collection work. Failures are isolated to the unit.
#[async_trait]
pub trait UnitCollector: Send + Sync {
    async fn collect(
        &self,
        unit: &Unit,
        ctx: &CollectContext,
    ) -> Result<OutputRef, CollectError>;
}

/// Per-unit scratch workspace handed to the collector for derived inputs.
///
/// Backed by a temp directory removed on drop, so cleanup is guaranteed on
/// every worker exit path, including panics and early returns.
#[derive(Debug)]
pub struct CollectContext {
    scratch: TempDir,
}

impl CollectContext {
    pub fn for_unit(unit: &Unit) -> Result<Self, CollectError> {
        let label: String = unit
            .id
            .as_str()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        let scratch = tempfile::Builder::new()
            .prefix(&format!("relsweep-{label}-"))
            .tempdir()?;
        Ok(CollectContext { scratch })
    }

    /// Root of the scratch workspace. Valid only for the lifetime of the
    /// unit's job.
    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_workspace_is_removed_on_drop() {
        let unit = Unit::new("sub/with:odd chars", "Odd");
        let ctx = CollectContext::for_unit(&unit).unwrap();
        let path = ctx.scratch_path().to_path_buf();
        assert!(path.is_dir());
        drop(ctx);
        assert!(!path.exists());
    }
}
