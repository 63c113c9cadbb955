//! Status engine - the entry point callers use.

use chrono::{DateTime, Utc};
use okr_core::{KeyResult, Objective, TimeWindow};

use crate::aggregator::{evaluate_objective, ObjectiveStatusResult};
use crate::calculator::{evaluate_key_result, ProgressStatus};
use crate::error::ProgressError;
use crate::policy::StatusPolicy;

/// Computes key result and objective statuses under a [`StatusPolicy`].
///
/// The engine holds no mutable state; one instance can be shared freely
/// across threads and tasks.
#[derive(Debug, Clone, Default)]
pub struct StatusEngine {
    policy: StatusPolicy,
}

impl StatusEngine {
    /// Create an engine with a policy.
    pub fn new(policy: StatusPolicy) -> Self {
        Self { policy }
    }

    /// The policy in effect.
    pub fn policy(&self) -> &StatusPolicy {
        &self.policy
    }

    /// Evaluate a key result against `[window_start, window_end]` at `now`.
    pub fn compute_progress(
        &self,
        key_result: &KeyResult,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<ProgressStatus, ProgressError> {
        evaluate_key_result(&self.policy, key_result, window_start, window_end, now)
    }

    /// Evaluate an objective against its cycle at the current instant.
    pub fn compute_objective_status(
        &self,
        objective: &Objective,
        key_results: &[KeyResult],
        cycle: &TimeWindow,
    ) -> Result<ObjectiveStatusResult, ProgressError> {
        self.compute_objective_status_at(objective, key_results, cycle, Utc::now())
    }

    /// Evaluate an objective against its cycle at `now`.
    pub fn compute_objective_status_at(
        &self,
        objective: &Objective,
        key_results: &[KeyResult],
        cycle: &TimeWindow,
        now: DateTime<Utc>,
    ) -> Result<ObjectiveStatusResult, ProgressError> {
        evaluate_objective(&self.policy, objective, key_results, cycle, now)
    }
}

/// [`StatusEngine::compute_progress`] under the default policy.
pub fn compute_progress(
    key_result: &KeyResult,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<ProgressStatus, ProgressError> {
    StatusEngine::default().compute_progress(key_result, window_start, window_end, now)
}

/// [`StatusEngine::compute_objective_status`] under the default policy.
pub fn compute_objective_status(
    objective: &Objective,
    key_results: &[KeyResult],
    cycle: &TimeWindow,
) -> Result<ObjectiveStatusResult, ProgressError> {
    StatusEngine::default().compute_objective_status(objective, key_results, cycle)
}

/// [`StatusEngine::compute_objective_status_at`] under the default policy.
pub fn compute_objective_status_at(
    objective: &Objective,
    key_results: &[KeyResult],
    cycle: &TimeWindow,
    now: DateTime<Utc>,
) -> Result<ObjectiveStatusResult, ProgressError> {
    StatusEngine::default().compute_objective_status_at(objective, key_results, cycle, now)
}
