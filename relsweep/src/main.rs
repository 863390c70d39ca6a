//! # relsweep
//!
//! Tenant-wide cloud reliability assessment runner. One invocation
//! enumerates the tenant's assessable units, narrows them with the
//! configured filters, processes each survivor through a bounded,
//! rate-limited worker pool, and writes a single run summary document.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relsweep_config::ConfigLoader;
use relsweep_core::{
    HttpProvider, Orchestrator, UnitCollector, UnitSource, aggregate,
    select_units,
};
use relsweep_model::UnitId;

mod output;

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "relsweep")]
#[command(version)]
#[command(
    about = "Run a tenant-wide reliability assessment across cloud units"
)]
struct Cli {
    /// Path to the assessment configuration file (TOML or JSON)
    #[arg(short, long, env = "RELSWEEP_CONFIG")]
    config: PathBuf,

    /// Skip every unit before this unit id, then process the rest
    #[arg(long, value_name = "UNIT")]
    resume_from: Option<String>,

    /// Cap the worker pool at this many parallel units (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=20))]
    throttle: Option<u64>,

    /// Directory receiving the run summary (overrides config)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ConfigLoader::load(&args.config).with_context(|| {
        format!("loading configuration from {}", args.config.display())
    })?;

    if let Some(throttle) = args.throttle {
        config.orchestrator.parallelism.enabled = throttle > 1;
        config.orchestrator.parallelism.max_degree = throttle as usize;
        info!(max_degree = throttle, "parallelism capped from command line");
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    let resume_from = args.resume_from.map(UnitId::from);

    let provider = Arc::new(
        HttpProvider::new(&config.collector)
            .context("building collection API client")?,
    );

    info!(tenant = %config.tenant_id, "enumerating assessable units");
    let candidates = provider
        .list_units(&config.tenant_id)
        .await
        .context("enumerating tenant units")?;
    info!(candidates = candidates.len(), "enumeration complete");

    let selected = select_units(candidates, &config.filters, resume_from)
        .context("selecting units for assessment")?;
    info!(selected = selected.len(), "unit selection complete");

    let orchestrator = Orchestrator::new(
        config.orchestrator.clone(),
        Arc::clone(&provider) as Arc<dyn UnitCollector>,
    );

    let cancel = orchestrator.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing in-flight units then stopping");
            cancel.cancel();
        }
    });

    let results = orchestrator.run(selected).await;
    let summary = aggregate(&config.tenant_id, results);
    info!(
        run_id = %summary.run_id,
        total = summary.total_units,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "assessment run complete"
    );

    match output::write_summary(&config.output_dir, &summary) {
        Ok(path) => info!(path = %path.display(), "run summary written"),
        Err(err) => {
            // The run itself finished; dump the summary rather than lose it.
            warn!(error = %format!("{err:#}"), "failed to persist run summary");
            match serde_json::to_string_pretty(&summary) {
                Ok(body) => println!("{body}"),
                Err(err) => warn!(error = %err, "run summary not serializable"),
            }
        }
    }

    Ok(())
}
