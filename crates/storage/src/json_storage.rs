//! JSON file storage implementation.
//!
//! Stores each entity as a pretty-printed JSON file under a root directory
//! (`objectives/`, `key_results/`, `cycles/`).

use std::path::{Path, PathBuf};
use okr_core::{Cycle, CycleId, KeyResult, KeyResultId, Objective, ObjectiveId};
use super::{CycleRepository, KeyResultRepository, ObjectiveRepository, Result};
use tokio::fs;

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Open storage at `root`, creating the entity directories if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("objectives")).await?;
        fs::create_dir_all(root.join("key_results")).await?;
        fs::create_dir_all(root.join("cycles")).await?;

        tracing::debug!("Opened JSON storage at {}", root.display());
        Ok(Self { root })
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn objective_path(&self, id: ObjectiveId) -> PathBuf {
        self.root.join("objectives").join(format!("{}.json", id))
    }
    fn key_result_path(&self, id: KeyResultId) -> PathBuf {
        self.root.join("key_results").join(format!("{}.json", id))
    }
    fn cycle_path(&self, id: CycleId) -> PathBuf {
        self.root.join("cycles").join(format!("{}.json", id))
    }
}

#[async_trait::async_trait]
impl ObjectiveRepository for JsonStorage {
    async fn save_objective(&self, objective: &Objective) -> Result<()> {
        write_json(&self.objective_path(objective.id), objective).await
    }

    async fn load_objective(&self, id: ObjectiveId) -> Result<Option<Objective>> {
        read_json(&self.objective_path(id)).await
    }

    async fn list_objectives(&self) -> Result<Vec<Objective>> {
        // A broken objective file only hides that objective; key results are read strictly.
        let mut objectives: Vec<Objective> =
            list_dir_skipping_corrupt(&self.root.join("objectives")).await?;
        objectives.sort_by_key(|o| o.id);
        Ok(objectives)
    }
}

#[async_trait::async_trait]
impl KeyResultRepository for JsonStorage {
    async fn save_key_result(&self, key_result: &KeyResult) -> Result<()> {
        write_json(&self.key_result_path(key_result.id), key_result).await
    }

    async fn load_key_result(&self, id: KeyResultId) -> Result<Option<KeyResult>> {
        read_json(&self.key_result_path(id)).await
    }

    async fn list_key_results(&self, objective_id: ObjectiveId) -> Result<Vec<KeyResult>> {
        let all: Vec<KeyResult> = list_dir(&self.root.join("key_results")).await?;
        let mut owned: Vec<KeyResult> = all
            .into_iter()
            .filter(|kr| kr.objective_id == objective_id)
            .collect();
        owned.sort_by_key(|kr| kr.id);
        Ok(owned)
    }
}

#[async_trait::async_trait]
impl CycleRepository for JsonStorage {
    async fn save_cycle(&self, cycle: &Cycle) -> Result<()> {
        write_json(&self.cycle_path(cycle.id), cycle).await
    }

    async fn load_cycle(&self, id: CycleId) -> Result<Option<Cycle>> {
        read_json(&self.cycle_path(id)).await
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    for path in json_files(dir).await? {
        if let Some(item) = read_json(&path).await? {
            items.push(item);
        }
    }
    Ok(items)
}

/// Like [`list_dir`], but unreadable files are logged and left out.
async fn list_dir_skipping_corrupt<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    for path in json_files(dir).await? {
        match read_json(&path).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => tracing::warn!("Skipping unreadable {}: {}", path.display(), e),
        }
    }
    Ok(items)
}

async fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use okr_core::{KeyResultType, ObjectiveStatus};

    #[tokio::test]
    async fn test_objective_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        let objective = Objective::new("Ship v2", CycleId::new()).with_status(ObjectiveStatus::Paused);
        storage.save_objective(&objective).await.unwrap();

        let loaded = storage.load_objective(objective.id).await.unwrap().unwrap();
        assert_eq!(loaded, objective);
        assert_eq!(storage.list_objectives().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_entities_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        assert!(storage.load_objective(ObjectiveId::new()).await.unwrap().is_none());
        assert!(storage.load_key_result(KeyResultId::new()).await.unwrap().is_none());
        assert!(storage.load_cycle(CycleId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_key_results_filters_by_objective() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        let mine = ObjectiveId::new();
        let other = ObjectiveId::new();
        for i in 0..3 {
            let kr = KeyResult::new(mine, format!("KR {}", i), KeyResultType::IncreaseTo, 0.0, 10.0, i as f64);
            storage.save_key_result(&kr).await.unwrap();
        }
        let foreign = KeyResult::new(other, "Foreign", KeyResultType::AchieveOrNot, 0.0, 1.0, 0.0);
        storage.save_key_result(&foreign).await.unwrap();

        assert_eq!(storage.list_key_results(mine).await.unwrap().len(), 3);
        assert_eq!(storage.list_key_results(other).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cycle_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        let start = Utc::now();
        let cycle = Cycle::new("Q3", start, start + Duration::days(92));
        storage.save_cycle(&cycle).await.unwrap();

        let loaded = storage.load_cycle(cycle.id).await.unwrap().unwrap();
        assert_eq!(loaded, cycle);
    }

    #[tokio::test]
    async fn test_list_skips_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        let objective = Objective::new("Valid", CycleId::new());
        storage.save_objective(&objective).await.unwrap();
        std::fs::write(dir.path().join("objectives").join("broken.json"), "{not json").unwrap();

        let listed = storage.list_objectives().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, objective.id);
    }

    #[tokio::test]
    async fn test_list_key_results_fails_on_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        let objective_id = ObjectiveId::new();
        let kr = KeyResult::new(objective_id, "Valid", KeyResultType::IncreaseTo, 0.0, 100.0, 100.0);
        storage.save_key_result(&kr).await.unwrap();

        let broken = serde_json::json!({
            "id": KeyResultId::new(),
            "objective_id": objective_id,
            "current_value": true,
            "target_value": 100,
            "base_value": 0,
            "key_result_type": "increase_to",
            "updated_at": Utc::now(),
        });
        std::fs::write(
            dir.path().join("key_results").join("broken.json"),
            broken.to_string(),
        )
        .unwrap();

        let result = storage.list_key_results(objective_id).await;
        assert!(matches!(result, Err(crate::StorageError::Json(_))));
    }
}
