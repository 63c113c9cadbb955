//! In-memory storage, for tests and one-shot evaluation.

use std::collections::HashMap;
use okr_core::{Cycle, CycleId, KeyResult, KeyResultId, Objective, ObjectiveId};
use super::{CycleRepository, KeyResultRepository, ObjectiveRepository, Result};
use tokio::sync::RwLock;

/// Storage backed by process-local maps.
#[derive(Default)]
pub struct MemoryStorage {
    objectives: RwLock<HashMap<ObjectiveId, Objective>>,
    key_results: RwLock<HashMap<KeyResultId, KeyResult>>,
    cycles: RwLock<HashMap<CycleId, Cycle>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ObjectiveRepository for MemoryStorage {
    async fn save_objective(&self, objective: &Objective) -> Result<()> {
        self.objectives.write().await.insert(objective.id, objective.clone());
        Ok(())
    }

    async fn load_objective(&self, id: ObjectiveId) -> Result<Option<Objective>> {
        Ok(self.objectives.read().await.get(&id).cloned())
    }

    async fn list_objectives(&self) -> Result<Vec<Objective>> {
        let mut objectives: Vec<Objective> = self.objectives.read().await.values().cloned().collect();
        objectives.sort_by_key(|o| o.id);
        Ok(objectives)
    }
}

#[async_trait::async_trait]
impl KeyResultRepository for MemoryStorage {
    async fn save_key_result(&self, key_result: &KeyResult) -> Result<()> {
        self.key_results.write().await.insert(key_result.id, key_result.clone());
        Ok(())
    }

    async fn load_key_result(&self, id: KeyResultId) -> Result<Option<KeyResult>> {
        Ok(self.key_results.read().await.get(&id).cloned())
    }

    async fn list_key_results(&self, objective_id: ObjectiveId) -> Result<Vec<KeyResult>> {
        let mut owned: Vec<KeyResult> = self
            .key_results
            .read()
            .await
            .values()
            .filter(|kr| kr.objective_id == objective_id)
            .cloned()
            .collect();
        owned.sort_by_key(|kr| kr.id);
        Ok(owned)
    }
}

#[async_trait::async_trait]
impl CycleRepository for MemoryStorage {
    async fn save_cycle(&self, cycle: &Cycle) -> Result<()> {
        self.cycles.write().await.insert(cycle.id, cycle.clone());
        Ok(())
    }

    async fn load_cycle(&self, id: CycleId) -> Result<Option<Cycle>> {
        Ok(self.cycles.read().await.get(&id).cloned())
    }
}
