//! Objective model - a qualitative goal measured by key results.
//!
//! Key results point at their objective through `KeyResult::objective_id`.

use serde::{Deserialize, Serialize};
use crate::id::{CycleId, ObjectiveId};
use crate::status::ObjectiveStatus;
use crate::Time;

/// An objective groups key results within a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Unique identifier
    pub id: ObjectiveId,

    /// Objective title
    #[serde(default)]
    pub title: String,

    /// Planning cycle this objective belongs to
    pub cycle_id: CycleId,

    /// Manual override (paused/canceled) or the last computed status
    #[serde(default)]
    pub status: ObjectiveStatus,

    /// Last updated
    pub updated_at: Time,
}

impl Objective {
    /// Create a new objective in a cycle.
    pub fn new(title: impl Into<String>, cycle_id: CycleId) -> Self {
        Self {
            id: ObjectiveId::new(),
            title: title.into(),
            cycle_id,
            status: ObjectiveStatus::NotStarted,
            updated_at: chrono::Utc::now(),
        }
    }

    /// Set the status.
    pub fn with_status(mut self, status: ObjectiveStatus) -> Self {
        self.status = status;
        self
    }
}
