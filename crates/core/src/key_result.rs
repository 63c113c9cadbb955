//! Key result model - a measurable outcome attached to an objective.

use serde::{Deserialize, Serialize};
use crate::id::{KeyResultId, ObjectiveId};
use crate::numeric::deserialize_lenient;
use crate::status::KeyResultStatus;
use crate::Time;

/// A key result measures progress toward an objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResult {
    /// Unique identifier
    pub id: KeyResultId,

    /// Owning objective
    pub objective_id: ObjectiveId,

    /// Key result title
    #[serde(default)]
    pub title: String,

    /// Current measured value
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub current_value: f64,

    /// Value to reach
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub target_value: f64,

    /// Starting value
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub base_value: f64,

    /// How progress is measured
    pub key_result_type: KeyResultType,

    /// Last persisted status (informational only)
    #[serde(default)]
    pub status: KeyResultStatus,

    /// End of this key result's own tracking window
    #[serde(default)]
    pub due_date: Option<Time>,

    /// Last updated
    pub updated_at: Time,
}

impl KeyResult {
    /// Create a key result with the given measurement.
    pub fn new(
        objective_id: ObjectiveId,
        title: impl Into<String>,
        key_result_type: KeyResultType,
        base_value: f64,
        target_value: f64,
        current_value: f64,
    ) -> Self {
        Self {
            id: KeyResultId::new(),
            objective_id,
            title: title.into(),
            current_value,
            target_value,
            base_value,
            key_result_type,
            status: KeyResultStatus::default(),
            due_date: None,
            updated_at: chrono::Utc::now(),
        }
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due_date: Time) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// How a key result's progress is measured.
///
/// Unrecognized wire values are kept in `Unsupported` rather than rejected
/// at deserialization, so the engine can report them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeyResultType {
    /// Move a value up from base to target
    IncreaseTo,
    /// Move a value down from base to target
    DecreaseTo,
    /// Binary: reached or not
    AchieveOrNot,
    /// Keep a value at or above target
    ShouldStayAbove,
    /// Keep a value at or below target
    ShouldStayBelow,
    /// A type this engine does not know
    Unsupported(String),
}

impl KeyResultType {
    /// Get string representation.
    pub fn as_str(&self) -> &str {
        match self {
            KeyResultType::IncreaseTo => "increase_to",
            KeyResultType::DecreaseTo => "decrease_to",
            KeyResultType::AchieveOrNot => "achieve_or_not",
            KeyResultType::ShouldStayAbove => "should_stay_above",
            KeyResultType::ShouldStayBelow => "should_stay_below",
            KeyResultType::Unsupported(name) => name,
        }
    }
}

impl From<&str> for KeyResultType {
    fn from(s: &str) -> Self {
        match s {
            "increase_to" => KeyResultType::IncreaseTo,
            "decrease_to" => KeyResultType::DecreaseTo,
            "achieve_or_not" => KeyResultType::AchieveOrNot,
            "should_stay_above" => KeyResultType::ShouldStayAbove,
            "should_stay_below" => KeyResultType::ShouldStayBelow,
            other => KeyResultType::Unsupported(other.to_string()),
        }
    }
}

impl From<String> for KeyResultType {
    fn from(s: String) -> Self {
        KeyResultType::from(s.as_str())
    }
}

impl From<KeyResultType> for String {
    fn from(kind: KeyResultType) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for KeyResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
