//! Cycle model - the planning period objectives are measured against.

use serde::{Deserialize, Serialize};
use crate::id::CycleId;
use crate::Time;

/// A planning cycle, e.g. a quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// Unique identifier
    pub id: CycleId,

    /// Cycle name
    #[serde(default)]
    pub name: String,

    /// First instant of the cycle
    pub start_date: Time,

    /// Last instant of the cycle
    pub end_date: Time,
}

impl Cycle {
    /// Create a new cycle.
    pub fn new(name: impl Into<String>, start_date: Time, end_date: Time) -> Self {
        Self {
            id: CycleId::new(),
            name: name.into(),
            start_date,
            end_date,
        }
    }

    /// The cycle's time window.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_date, self.end_date)
    }
}

/// A half-open span of time used to measure ideal progress.
///
/// A window whose end is not after its start is degenerate and counts as
/// fully elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Window start
    pub start: Time,
    /// Window end
    pub end: Time,
}

impl TimeWindow {
    /// Create a window.
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Whether the window has no positive length.
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }
}
