//! OKR core data models.
//!
//! This crate defines the objectives, key results and cycles that the
//! status engine reads, plus the two status vocabularies it produces.

#![warn(missing_docs)]

// Core identities
mod id;

// Planning entities
mod cycle;
mod key_result;
mod objective;

// Status vocabularies
mod status;

pub mod numeric;

// Re-exports
pub use id::*;

pub use cycle::{Cycle, TimeWindow};
pub use key_result::{KeyResult, KeyResultType};
pub use objective::Objective;
pub use status::{KeyResultStatus, ObjectiveStatus};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
