//! OKR CLI - evaluate key results and objectives, refresh stored statuses.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use okr_core::{Cycle, KeyResult, KeyResultType, Objective, ObjectiveId};
use okr_progress::{BasicStatusTracker, StatusEngine, StatusPolicy, StatusTracker};
use okr_storage::{CycleRepository, JsonStorage, KeyResultRepository, ObjectiveRepository};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "okr")]
#[command(about = "OKR progress and status engine", long_about = None)]
struct Cli {
    /// Status policy file (JSON)
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single key result
    Progress {
        /// Key result type (increase_to, decrease_to, achieve_or_not, ...)
        #[arg(long)]
        kind: String,
        /// Starting value
        #[arg(long, default_value = "0")]
        base: String,
        /// Target value
        #[arg(long)]
        target: String,
        /// Current value
        #[arg(long)]
        current: String,
        /// Window start (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,
        /// Window end (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,
        /// Evaluation time (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Evaluate an objective snapshot file
    Evaluate {
        /// Snapshot with objective, key_results and cycle
        snapshot: PathBuf,
        /// Evaluation time (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Write a snapshot's entities into a store
    Seed {
        /// Store directory
        #[arg(long, default_value = ".okr")]
        dir: PathBuf,
        /// Snapshot with objective, key_results and cycle
        snapshot: PathBuf,
    },
    /// Recompute and persist every stored objective's status
    Recompute {
        /// Store directory
        #[arg(long, default_value = ".okr")]
        dir: PathBuf,
        /// Evaluation time (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

/// An objective with everything needed to evaluate it.
#[derive(Debug, Deserialize)]
struct Snapshot {
    objective: Objective,
    #[serde(default)]
    key_results: Vec<KeyResult>,
    cycle: Cycle,
}

impl Snapshot {
    fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&json)
            .with_context(|| format!("Invalid snapshot {}", path.display()))?;

        if snapshot.objective.cycle_id != snapshot.cycle.id {
            anyhow::bail!(
                "Snapshot cycle {} does not match objective cycle {}",
                snapshot.cycle.id,
                snapshot.objective.cycle_id
            );
        }
        if let Some(stray) = snapshot
            .key_results
            .iter()
            .find(|kr| kr.objective_id != snapshot.objective.id)
        {
            anyhow::bail!("Key result {} belongs to another objective", stray.id);
        }
        Ok(snapshot)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let policy = match &cli.policy {
        Some(path) => StatusPolicy::from_json_file(path)
            .with_context(|| format!("Failed to load policy {}", path.display()))?,
        None => StatusPolicy::default(),
    };
    let engine = StatusEngine::new(policy);

    match cli.command {
        Commands::Progress { kind, base, target, current, start, end, now } => {
            let key_result = KeyResult::new(
                ObjectiveId::new(),
                "",
                KeyResultType::from(kind.as_str()),
                okr_core::numeric::parse_lenient(&base),
                okr_core::numeric::parse_lenient(&target),
                okr_core::numeric::parse_lenient(&current),
            );
            let status = engine.compute_progress(&key_result, start, end, now.unwrap_or_else(Utc::now))?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Evaluate { snapshot, now } => {
            let snapshot = Snapshot::load(&snapshot)?;
            let result = engine.compute_objective_status_at(
                &snapshot.objective,
                &snapshot.key_results,
                &snapshot.cycle.window(),
                now.unwrap_or_else(Utc::now),
            )?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Seed { dir, snapshot } => {
            let snapshot = Snapshot::load(&snapshot)?;
            let storage = JsonStorage::new(&dir).await?;
            storage.save_cycle(&snapshot.cycle).await?;
            storage.save_objective(&snapshot.objective).await?;
            for key_result in &snapshot.key_results {
                storage.save_key_result(key_result).await?;
            }
            info!(
                "Seeded objective {} with {} key results into {}",
                snapshot.objective.id,
                snapshot.key_results.len(),
                dir.display()
            );
        }
        Commands::Recompute { dir, now } => {
            let storage = Arc::new(JsonStorage::new(&dir).await?);
            let tracker = BasicStatusTracker::new(storage).with_engine(engine);
            let report = tracker.refresh_all(now.unwrap_or_else(Utc::now)).await?;

            println!("Objectives ({})", report.refreshed.len() + report.failed.len());
            for (id, status) in &report.refreshed {
                println!("  {} | {}", id, status);
            }
            for (id, reason) in &report.failed {
                println!("  {} | FAILED: {}", id, reason);
            }
            if !report.failed.is_empty() {
                anyhow::bail!("{} objectives could not be recomputed", report.failed.len());
            }
        }
    }

    Ok(())
}
