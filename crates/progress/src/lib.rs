//! Progress and status engine.
//!
//! Converts key result values and a time window into a completion
//! percentage and a traffic-light status, and rolls key results up into an
//! objective status. The calculator and aggregator are pure; the tracker is
//! the storage-backed caller that persists their results.

#![warn(missing_docs)]

pub mod aggregator;
pub mod calculator;
pub mod engine;
pub mod error;
pub mod policy;
pub mod tracker;

pub use aggregator::{evaluate_objective, overall_progress, ObjectiveStatusResult};
pub use calculator::{evaluate_key_result, progress_percentage, time_progress, ProgressStatus};
pub use engine::{compute_objective_status, compute_objective_status_at, compute_progress, StatusEngine};
pub use error::{PolicyError, ProgressError};
pub use policy::StatusPolicy;
pub use tracker::{BasicStatusTracker, BatchReport, StatusTracker, TrackerError};
