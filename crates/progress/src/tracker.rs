//! Status tracking service.
//!
//! Loads entities from storage, runs them through the [`StatusEngine`] and
//! writes the computed statuses back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use okr_core::{CycleId, KeyResultId, ObjectiveId, ObjectiveStatus};
use okr_storage::{Storage, StorageError};
use std::sync::Arc;

use crate::aggregator::ObjectiveStatusResult;
use crate::calculator::ProgressStatus;
use crate::engine::StatusEngine;
use crate::error::ProgressError;

/// Errors raised while refreshing stored statuses.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Engine rejected the input
    #[error("{0}")]
    Engine(#[from] ProgressError),

    /// Objective missing from storage
    #[error("Objective not found: {0}")]
    ObjectiveNotFound(ObjectiveId),

    /// Key result missing from storage
    #[error("Key result not found: {0}")]
    KeyResultNotFound(KeyResultId),

    /// Cycle missing from storage
    #[error("Cycle not found: {0}")]
    CycleNotFound(CycleId),
}

/// Outcome of refreshing every objective.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Objectives whose status was recomputed
    pub refreshed: Vec<(ObjectiveId, ObjectiveStatus)>,

    /// Objectives that could not be recomputed, with the reason
    pub failed: Vec<(ObjectiveId, String)>,
}

/// Status tracking service.
#[async_trait]
pub trait StatusTracker: Send + Sync {
    /// Recompute one key result's status, persisting it unless its objective is paused or canceled.
    async fn refresh_key_result(
        &self,
        id: KeyResultId,
        now: DateTime<Utc>,
    ) -> Result<ProgressStatus, TrackerError>;

    /// Recompute and persist one objective's status and its key results'.
    async fn refresh_objective(
        &self,
        id: ObjectiveId,
        now: DateTime<Utc>,
    ) -> Result<ObjectiveStatusResult, TrackerError>;

    /// Recompute every stored objective. A failing objective never stops the others.
    async fn refresh_all(&self, now: DateTime<Utc>) -> Result<BatchReport, TrackerError>;
}

/// Basic status tracker implementation.
pub struct BasicStatusTracker<S: Storage> {
    storage: Arc<S>,
    engine: Arc<StatusEngine>,
}

impl<S: Storage> BasicStatusTracker<S> {
    /// Create a tracker over `storage` with the default policy.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            engine: Arc::new(StatusEngine::default()),
        }
    }

    /// Use a specific engine.
    pub fn with_engine(mut self, engine: StatusEngine) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    /// The underlying storage.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

#[async_trait]
impl<S: Storage + 'static> StatusTracker for BasicStatusTracker<S> {
    async fn refresh_key_result(
        &self,
        id: KeyResultId,
        now: DateTime<Utc>,
    ) -> Result<ProgressStatus, TrackerError> {
        let mut key_result = self
            .storage
            .load_key_result(id)
            .await?
            .ok_or(TrackerError::KeyResultNotFound(id))?;
        let objective = self
            .storage
            .load_objective(key_result.objective_id)
            .await?
            .ok_or(TrackerError::ObjectiveNotFound(key_result.objective_id))?;
        let cycle = self
            .storage
            .load_cycle(objective.cycle_id)
            .await?
            .ok_or(TrackerError::CycleNotFound(objective.cycle_id))?;

        let end = key_result.due_date.unwrap_or(cycle.end_date);
        let progress = self
            .engine
            .compute_progress(&key_result, cycle.start_date, end, now)?;

        if !objective.status.is_manual() && key_result.status != progress.status {
            key_result.status = progress.status;
            key_result.updated_at = now;
            self.storage.save_key_result(&key_result).await?;
        }
        Ok(progress)
    }

    async fn refresh_objective(
        &self,
        id: ObjectiveId,
        now: DateTime<Utc>,
    ) -> Result<ObjectiveStatusResult, TrackerError> {
        refresh_objective_in(self.storage.as_ref(), &self.engine, id, now).await
    }

    async fn refresh_all(&self, now: DateTime<Utc>) -> Result<BatchReport, TrackerError> {
        let objectives = self.storage.list_objectives().await?;

        let handles: Vec<_> = objectives
            .into_iter()
            .map(|objective| {
                let storage = Arc::clone(&self.storage);
                let engine = Arc::clone(&self.engine);
                let id = objective.id;
                let handle = tokio::spawn(async move {
                    refresh_objective_in(storage.as_ref(), &engine, id, now).await
                });
                (id, handle)
            })
            .collect();

        let mut report = BatchReport::default();
        for (id, handle) in handles {
            match handle.await {
                Ok(Ok(result)) => report.refreshed.push((id, result.status)),
                Ok(Err(e)) => {
                    tracing::warn!("Failed to refresh objective {}: {}", id, e);
                    report.failed.push((id, e.to_string()));
                }
                Err(e) => {
                    tracing::warn!("Refresh task for objective {} aborted: {}", id, e);
                    report.failed.push((id, e.to_string()));
                }
            }
        }

        tracing::info!(
            "Refreshed {} objectives ({} failed)",
            report.refreshed.len(),
            report.failed.len()
        );
        Ok(report)
    }
}

async fn refresh_objective_in<S: Storage>(
    storage: &S,
    engine: &StatusEngine,
    id: ObjectiveId,
    now: DateTime<Utc>,
) -> Result<ObjectiveStatusResult, TrackerError> {
    let mut objective = storage
        .load_objective(id)
        .await?
        .ok_or(TrackerError::ObjectiveNotFound(id))?;
    let cycle = storage
        .load_cycle(objective.cycle_id)
        .await?
        .ok_or(TrackerError::CycleNotFound(objective.cycle_id))?;
    let mut key_results = storage.list_key_results(id).await?;
    let window = cycle.window();

    let result = engine.compute_objective_status_at(&objective, &key_results, &window, now)?;

    // Manual statuses are owned by the user; leave the stored records alone.
    if objective.status.is_manual() {
        return Ok(result);
    }

    for key_result in &mut key_results {
        let end = key_result.due_date.unwrap_or(window.end);
        let progress = engine.compute_progress(key_result, window.start, end, now)?;
        if key_result.status != progress.status {
            key_result.status = progress.status;
            key_result.updated_at = now;
            storage.save_key_result(key_result).await?;
        }
    }

    if objective.status != result.status {
        objective.status = result.status;
        objective.updated_at = now;
        storage.save_objective(&objective).await?;
    }
    Ok(result)
}
