//! Key result progress calculation.
//!
//! Turns a key result's raw values into a completion percentage, measures
//! how much of a time window has elapsed, and compares the two to pick a
//! [`KeyResultStatus`]. Percentages stay unrounded until the output is built.

use chrono::{DateTime, Utc};
use okr_core::{numeric, KeyResult, KeyResultStatus, KeyResultType, TimeWindow};
use serde::{Deserialize, Serialize};

use crate::error::ProgressError;
use crate::policy::StatusPolicy;

/// Progress evaluation of a single key result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStatus {
    /// Traffic-light status
    pub status: KeyResultStatus,

    /// Completion, 0-100
    pub progress_percentage: u8,

    /// Elapsed share of the window, 0-100
    pub time_progress_percentage: u8,

    /// Human-readable advice for the owner
    pub recommendation: String,
}

/// Completion percentage of a key result in `[0, 100]`, unrounded.
///
/// The formula is selected by `key_result_type` alone. Non-finite inputs are
/// read as 0.
pub fn progress_percentage(key_result: &KeyResult) -> Result<f64, ProgressError> {
    let current = numeric::sanitize(key_result.current_value);
    let target = numeric::sanitize(key_result.target_value);
    let base = numeric::sanitize(key_result.base_value);

    let raw = match &key_result.key_result_type {
        KeyResultType::IncreaseTo => {
            if base == target {
                reached(current >= target)
            } else {
                (current - base) / (target - base) * 100.0
            }
        }
        KeyResultType::DecreaseTo => {
            if base == target {
                reached(current <= target)
            } else {
                (base - current) / (base - target) * 100.0
            }
        }
        KeyResultType::AchieveOrNot | KeyResultType::ShouldStayAbove => reached(current >= target),
        KeyResultType::ShouldStayBelow => reached(current <= target),
        KeyResultType::Unsupported(name) => {
            return Err(ProgressError::UnsupportedKeyResultType(name.clone()));
        }
    };

    Ok(clamp_percent(raw))
}

/// Elapsed share of `window` at `now` in `[0, 100]`, unrounded.
///
/// A window with no positive length counts as fully elapsed.
pub fn time_progress(window: &TimeWindow, now: DateTime<Utc>) -> f64 {
    let total = (window.end - window.start).num_milliseconds();
    if window.is_degenerate() || total <= 0 {
        return 100.0;
    }
    if now <= window.start {
        return 0.0;
    }
    if now >= window.end {
        return 100.0;
    }

    let elapsed = (now - window.start).num_milliseconds();
    clamp_percent(elapsed as f64 / total as f64 * 100.0)
}

/// Evaluate a key result against the window `[window_start, window_end]` at `now`.
pub fn evaluate_key_result(
    policy: &StatusPolicy,
    key_result: &KeyResult,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<ProgressStatus, ProgressError> {
    let progress = progress_percentage(key_result)?;
    let time = time_progress(&TimeWindow::new(window_start, window_end), now);

    let (status, recommendation) = if progress >= 100.0 {
        (
            KeyResultStatus::Completed,
            "Target reached. This key result is complete.",
        )
    } else if progress >= time {
        (
            KeyResultStatus::OnTrack,
            "Progress meets or beats the expected pace. Keep going.",
        )
    } else if progress >= time * policy.at_risk_pace_ratio {
        (
            KeyResultStatus::AtRisk,
            "Progress is slightly behind the expected pace. Consider speeding up.",
        )
    } else {
        (
            KeyResultStatus::Behind,
            "Progress is well behind the expected pace. Intervention is recommended.",
        )
    };

    tracing::debug!(
        key_result = %key_result.id,
        progress,
        time,
        status = %status,
        "Evaluated key result"
    );

    Ok(ProgressStatus {
        status,
        progress_percentage: round_percent(progress),
        time_progress_percentage: round_percent(time),
        recommendation: recommendation.to_string(),
    })
}

fn reached(hit: bool) -> f64 {
    if hit {
        100.0
    } else {
        0.0
    }
}

pub(crate) fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

pub(crate) fn round_percent(value: f64) -> u8 {
    clamp_percent(value).round() as u8
}
