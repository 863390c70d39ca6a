//! Run summary persistence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use relsweep_model::RunSummary;

/// Write the summary as pretty JSON under `output_dir`, creating the
/// directory if needed. Returns the path of the written document.
pub fn write_summary(
    output_dir: &Path,
    summary: &RunSummary,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("creating output directory {}", output_dir.display())
    })?;

    let stamp = summary.generated_at.format("%Y%m%dT%H%M%SZ");
    let path = output_dir.join(format!("relsweep-summary-{stamp}.json"));

    let body = serde_json::to_string_pretty(summary)
        .context("serializing run summary")?;
    fs::write(&path, body)
        .with_context(|| format!("writing {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use uuid::Uuid;

    use relsweep_model::{JobResult, OutputRef, Unit};

    fn summary() -> RunSummary {
        let mut result = JobResult::pending(&Unit::new("sub-1", "Production"));
        result.start().unwrap();
        result.succeed(OutputRef::new("out/sub-1.json")).unwrap();
        RunSummary {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            tenant_id: "contoso".into(),
            total_units: 1,
            succeeded: 1,
            failed: 0,
            results: vec![result],
        }
    }

    #[test]
    fn writes_into_a_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out");

        let path = write_summary(&target, &summary()).unwrap();
        assert!(path.exists());
        let body = fs::read_to_string(&path).unwrap();
        assert!(body.contains("\"tenant_id\": \"contoso\""));
        // Each terminal record in the document carries its duration.
        assert!(body.contains("\"duration_seconds\""));
    }

    #[test]
    fn filename_carries_the_generation_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let summary = summary();
        let path = write_summary(dir.path(), &summary).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("relsweep-summary-"));
        assert!(name.ends_with("Z.json"));
    }
}
