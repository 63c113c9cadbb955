//! Objective status aggregation.
//!
//! Rolls key result completion up into one of the nine objective statuses.
//! Time is measured once, against the objective's cycle, never against the
//! key results' own due dates. Nothing from a previous computation carries
//! over: the status is rebuilt from scratch on every call.

use chrono::{DateTime, Utc};
use okr_core::{KeyResult, Objective, ObjectiveStatus, TimeWindow};
use serde::{Deserialize, Serialize};

use crate::calculator::{progress_percentage, round_percent, time_progress};
use crate::error::ProgressError;
use crate::policy::StatusPolicy;

/// Status evaluation of an objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveStatusResult {
    /// Computed status
    pub status: ObjectiveStatus,

    /// Why this status was chosen
    pub rationale: String,

    /// Guidance attached to the status
    pub note: String,

    /// Mean key result completion, when it was computed
    pub overall_progress: Option<u8>,

    /// Elapsed share of the cycle, when it was computed
    pub time_progress: Option<u8>,
}

impl ObjectiveStatusResult {
    fn new(status: ObjectiveStatus, rationale: &str, note: &str) -> Self {
        Self {
            status,
            rationale: rationale.to_string(),
            note: note.to_string(),
            overall_progress: None,
            time_progress: None,
        }
    }

    fn with_figures(mut self, overall: f64, time: f64) -> Self {
        self.overall_progress = Some(round_percent(overall));
        self.time_progress = Some(round_percent(time));
        self
    }
}

/// Unweighted mean completion of `key_results`, or `None` when there are none.
pub fn overall_progress(key_results: &[KeyResult]) -> Result<Option<f64>, ProgressError> {
    if key_results.is_empty() {
        return Ok(None);
    }

    let mut total = 0.0;
    for key_result in key_results {
        total += progress_percentage(key_result)?;
    }
    Ok(Some(total / key_results.len() as f64))
}

/// Evaluate an objective's status at `now`.
pub fn evaluate_objective(
    policy: &StatusPolicy,
    objective: &Objective,
    key_results: &[KeyResult],
    cycle: &TimeWindow,
    now: DateTime<Utc>,
) -> Result<ObjectiveStatusResult, ProgressError> {
    let result = decide(policy, objective, key_results, cycle, now)?;
    tracing::debug!(
        objective = %objective.id,
        status = %result.status,
        overall = ?result.overall_progress,
        time = ?result.time_progress,
        "Evaluated objective"
    );
    Ok(result)
}

fn decide(
    policy: &StatusPolicy,
    objective: &Objective,
    key_results: &[KeyResult],
    cycle: &TimeWindow,
    now: DateTime<Utc>,
) -> Result<ObjectiveStatusResult, ProgressError> {
    match objective.status {
        ObjectiveStatus::Paused => {
            return Ok(ObjectiveStatusResult::new(
                ObjectiveStatus::Paused,
                "The objective has been paused by its owner.",
                "Progress is not evaluated while paused.",
            ));
        }
        ObjectiveStatus::Canceled => {
            return Ok(ObjectiveStatusResult::new(
                ObjectiveStatus::Canceled,
                "The objective has been canceled by its owner.",
                "Canceled objectives are no longer evaluated.",
            ));
        }
        _ => {}
    }

    let Some(overall) = overall_progress(key_results)? else {
        return Ok(ObjectiveStatusResult::new(
            ObjectiveStatus::NotStarted,
            "The objective has no key results yet.",
            "Add key results to start measuring progress.",
        ));
    };
    let time = time_progress(cycle, now);

    let result = if overall >= 100.0 {
        ObjectiveStatusResult::new(
            ObjectiveStatus::Completed,
            "Every key result has reached its target.",
            "The objective is fully achieved.",
        )
    } else if time >= 100.0 {
        if overall >= policy.partial_achievement_threshold {
            ObjectiveStatusResult::new(
                ObjectiveStatus::PartiallyAchieved,
                "The cycle has ended with a meaningful share of the targets reached.",
                "Review what was missed before planning the next cycle.",
            )
        } else {
            ObjectiveStatusResult::new(
                ObjectiveStatus::NotAchieved,
                "The cycle has ended with most targets unmet.",
                "Reassess the objective's scope or approach for the next cycle.",
            )
        }
    } else {
        let gap = overall - time;
        if gap >= 0.0 {
            ObjectiveStatusResult::new(
                ObjectiveStatus::OnTrack,
                "Progress is keeping pace with the time elapsed in the cycle.",
                "Current momentum is likely to meet the objective.",
            )
        } else if gap >= policy.behind_gap_threshold {
            ObjectiveStatusResult::new(
                ObjectiveStatus::AtRisk,
                "Progress is somewhat behind the time elapsed in the cycle.",
                "Targets are reachable with additional focus.",
            )
        } else {
            ObjectiveStatusResult::new(
                ObjectiveStatus::Behind,
                "Progress is far behind the time elapsed in the cycle.",
                "Targets are unlikely to be met without intervention.",
            )
        }
    };

    Ok(result.with_figures(overall, time))
}
