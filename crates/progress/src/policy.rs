//! Status thresholds.
//!
//! These numbers are product policy, not math, so they are loadable from a
//! JSON file and overridable per engine.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PolicyError;

/// Fraction of the ideal pace below which a key result is `behind` rather than `at_risk`.
pub const DEFAULT_AT_RISK_PACE_RATIO: f64 = 0.8;

/// Minimum overall progress for an elapsed cycle to count as `partially_achieved`.
pub const DEFAULT_PARTIAL_ACHIEVEMENT_THRESHOLD: f64 = 50.0;

/// Smallest (most negative) progress-minus-time gap still classed `at_risk`.
pub const DEFAULT_BEHIND_GAP_THRESHOLD: f64 = -20.0;

/// Thresholds used by the status decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusPolicy {
    /// Key result is `at_risk` while `progress >= time_progress * ratio`
    pub at_risk_pace_ratio: f64,

    /// Elapsed objective is `partially_achieved` at or above this percentage
    pub partial_achievement_threshold: f64,

    /// Open objective is `at_risk` while `gap >= threshold`, `behind` below it
    pub behind_gap_threshold: f64,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            at_risk_pace_ratio: DEFAULT_AT_RISK_PACE_RATIO,
            partial_achievement_threshold: DEFAULT_PARTIAL_ACHIEVEMENT_THRESHOLD,
            behind_gap_threshold: DEFAULT_BEHIND_GAP_THRESHOLD,
        }
    }
}

impl StatusPolicy {
    /// Set the at-risk pace ratio.
    pub fn with_at_risk_pace_ratio(mut self, ratio: f64) -> Self {
        self.at_risk_pace_ratio = ratio;
        self
    }

    /// Set the partial achievement threshold.
    pub fn with_partial_achievement_threshold(mut self, threshold: f64) -> Self {
        self.partial_achievement_threshold = threshold;
        self
    }

    /// Set the behind gap threshold.
    pub fn with_behind_gap_threshold(mut self, threshold: f64) -> Self {
        self.behind_gap_threshold = threshold;
        self
    }

    /// Check every threshold is finite and within range.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let ratio = self.at_risk_pace_ratio;
        if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
            return Err(PolicyError::Invalid {
                field: "at_risk_pace_ratio",
                reason: format!("must be in (0, 1], got {}", ratio),
            });
        }

        let partial = self.partial_achievement_threshold;
        if !partial.is_finite() || !(0.0..=100.0).contains(&partial) {
            return Err(PolicyError::Invalid {
                field: "partial_achievement_threshold",
                reason: format!("must be in [0, 100], got {}", partial),
            });
        }

        let gap = self.behind_gap_threshold;
        if !gap.is_finite() || gap > 0.0 {
            return Err(PolicyError::Invalid {
                field: "behind_gap_threshold",
                reason: format!("must be <= 0, got {}", gap),
            });
        }

        Ok(())
    }

    /// Parse and validate a policy from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, PolicyError> {
        let policy: StatusPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load and validate a policy file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let policy = Self::from_json_str(&json)?;
        tracing::debug!("Loaded status policy from {}: {:?}", path.as_ref().display(), policy);
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = StatusPolicy::default();
        assert_eq!(policy.at_risk_pace_ratio, 0.8);
        assert_eq!(policy.partial_achievement_threshold, 50.0);
        assert_eq!(policy.behind_gap_threshold, -20.0);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let policy = StatusPolicy::from_json_str(r#"{"at_risk_pace_ratio": 0.5}"#).unwrap();
        assert_eq!(policy.at_risk_pace_ratio, 0.5);
        assert_eq!(policy.partial_achievement_threshold, DEFAULT_PARTIAL_ACHIEVEMENT_THRESHOLD);
        assert_eq!(policy.behind_gap_threshold, DEFAULT_BEHIND_GAP_THRESHOLD);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let bad_ratio = StatusPolicy::default().with_at_risk_pace_ratio(1.5);
        assert!(matches!(
            bad_ratio.validate(),
            Err(PolicyError::Invalid { field: "at_risk_pace_ratio", .. })
        ));

        let zero_ratio = StatusPolicy::default().with_at_risk_pace_ratio(0.0);
        assert!(zero_ratio.validate().is_err());

        let bad_partial = StatusPolicy::default().with_partial_achievement_threshold(120.0);
        assert!(matches!(
            bad_partial.validate(),
            Err(PolicyError::Invalid { field: "partial_achievement_threshold", .. })
        ));

        let bad_gap = StatusPolicy::default().with_behind_gap_threshold(5.0);
        assert!(matches!(
            bad_gap.validate(),
            Err(PolicyError::Invalid { field: "behind_gap_threshold", .. })
        ));

        let nan_gap = StatusPolicy::default().with_behind_gap_threshold(f64::NAN);
        assert!(nan_gap.validate().is_err());
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            StatusPolicy::from_json_str(r#"{"behind_gap_threshold": 10}"#),
            Err(PolicyError::Invalid { .. })
        ));
        assert!(matches!(
            StatusPolicy::from_json_str("not json"),
            Err(PolicyError::Json(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        std::fs::write(&path, r#"{"partial_achievement_threshold": 70}"#).unwrap();

        let policy = StatusPolicy::from_json_file(&path).unwrap();
        assert_eq!(policy.partial_achievement_threshold, 70.0);

        let missing = StatusPolicy::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(PolicyError::Io(_))));
    }
}
