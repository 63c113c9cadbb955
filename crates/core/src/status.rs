//! Status vocabularies for key results and objectives.
//!
//! The two enums overlap in naming (`on_track`, `at_risk`, `behind`,
//! `completed`) but are computed independently and must stay separate types.

use serde::{Deserialize, Serialize};

/// Traffic-light status of a single key result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyResultStatus {
    /// Progress meets or beats the ideal pace
    OnTrack,
    /// Progress is slightly behind the ideal pace
    AtRisk,
    /// Progress is well behind the ideal pace
    Behind,
    /// Target fully reached
    Completed,
}

impl KeyResultStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyResultStatus::OnTrack => "on_track",
            KeyResultStatus::AtRisk => "at_risk",
            KeyResultStatus::Behind => "behind",
            KeyResultStatus::Completed => "completed",
        }
    }
}

impl Default for KeyResultStatus {
    fn default() -> Self {
        KeyResultStatus::OnTrack
    }
}

impl std::fmt::Display for KeyResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of an objective.
///
/// `Paused` and `Canceled` are set by hand and override computation; every
/// other value is derived from the objective's key results and cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveStatus {
    /// No key results to measure yet
    NotStarted,
    /// Progress keeps pace with the cycle
    OnTrack,
    /// Progress is somewhat behind the cycle
    AtRisk,
    /// Progress is far behind the cycle
    Behind,
    /// Paused by hand
    Paused,
    /// Canceled by hand
    Canceled,
    /// Every key result reached its target
    Completed,
    /// Cycle ended with enough progress
    PartiallyAchieved,
    /// Cycle ended with too little progress
    NotAchieved,
}

impl ObjectiveStatus {
    /// All nine statuses.
    pub const ALL: [ObjectiveStatus; 9] = [
        ObjectiveStatus::NotStarted,
        ObjectiveStatus::OnTrack,
        ObjectiveStatus::AtRisk,
        ObjectiveStatus::Behind,
        ObjectiveStatus::Paused,
        ObjectiveStatus::Canceled,
        ObjectiveStatus::Completed,
        ObjectiveStatus::PartiallyAchieved,
        ObjectiveStatus::NotAchieved,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveStatus::NotStarted => "not_started",
            ObjectiveStatus::OnTrack => "on_track",
            ObjectiveStatus::AtRisk => "at_risk",
            ObjectiveStatus::Behind => "behind",
            ObjectiveStatus::Paused => "paused",
            ObjectiveStatus::Canceled => "canceled",
            ObjectiveStatus::Completed => "completed",
            ObjectiveStatus::PartiallyAchieved => "partially_achieved",
            ObjectiveStatus::NotAchieved => "not_achieved",
        }
    }

    /// Whether this status is a manual override that computation must keep.
    pub fn is_manual(&self) -> bool {
        matches!(self, ObjectiveStatus::Paused | ObjectiveStatus::Canceled)
    }
}

impl Default for ObjectiveStatus {
    fn default() -> Self {
        ObjectiveStatus::NotStarted
    }
}

impl std::fmt::Display for ObjectiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
