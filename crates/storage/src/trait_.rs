//! Repository trait abstractions.

use async_trait::async_trait;
use okr_core::{Cycle, CycleId, KeyResult, KeyResultId, Objective, ObjectiveId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Objective persistence.
#[async_trait]
pub trait ObjectiveRepository: Send + Sync {
    /// Save an objective (create or update).
    async fn save_objective(&self, objective: &Objective) -> Result<()>;

    /// Load an objective by ID.
    async fn load_objective(&self, id: ObjectiveId) -> Result<Option<Objective>>;

    /// List all objectives.
    async fn list_objectives(&self) -> Result<Vec<Objective>>;
}

/// Key result persistence.
#[async_trait]
pub trait KeyResultRepository: Send + Sync {
    /// Save a key result (create or update).
    async fn save_key_result(&self, key_result: &KeyResult) -> Result<()>;

    /// Load a key result by ID.
    async fn load_key_result(&self, id: KeyResultId) -> Result<Option<KeyResult>>;

    /// List the key results belonging to an objective.
    async fn list_key_results(&self, objective_id: ObjectiveId) -> Result<Vec<KeyResult>>;
}

/// Cycle persistence.
#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// Save a cycle (create or update).
    async fn save_cycle(&self, cycle: &Cycle) -> Result<()>;

    /// Load a cycle by ID.
    async fn load_cycle(&self, id: CycleId) -> Result<Option<Cycle>>;
}

/// Everything the status tracker needs from a backend.
///
/// Implemented automatically for any type providing all three repositories.
pub trait Storage: ObjectiveRepository + KeyResultRepository + CycleRepository {}

impl<T> Storage for T where T: ObjectiveRepository + KeyResultRepository + CycleRepository {}
