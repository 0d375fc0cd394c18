//! Generator catalog repository for JSON storage
//!
//! Manages loading and saving the generator model catalog to generators.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::AdminError;
use crate::models::{GeneratorId, GeneratorModel};

use super::file_io::{read_json, write_json_atomic};

/// Serializable catalog data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GeneratorData {
    generators: Vec<GeneratorModel>,
}

/// Repository for generator catalog persistence
pub struct GeneratorRepository {
    path: PathBuf,
    data: RwLock<HashMap<GeneratorId, GeneratorModel>>,
}

impl GeneratorRepository {
    /// Create a new generator repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load the catalog from disk
    pub fn load(&self) -> Result<(), AdminError> {
        let file_data: GeneratorData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for generator in file_data.generators {
            data.insert(generator.id, generator);
        }

        Ok(())
    }

    /// Save the catalog to disk
    pub fn save(&self) -> Result<(), AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = GeneratorData {
            generators: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a model by ID
    pub fn get(&self, id: GeneratorId) -> Result<Option<GeneratorModel>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get the whole catalog, sorted by brand then name
    pub fn get_all(&self) -> Result<Vec<GeneratorModel>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut generators: Vec<_> = data.values().cloned().collect();
        generators.sort_by(|a, b| a.brand.cmp(&b.brand).then(a.name.cmp(&b.name)));
        Ok(generators)
    }

    /// Get all non-archived models
    pub fn get_active(&self) -> Result<Vec<GeneratorModel>, AdminError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|g| !g.archived).collect())
    }

    /// Get a model by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<GeneratorModel>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|g| g.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a model
    pub fn upsert(&self, generator: GeneratorModel) -> Result<(), AdminError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(generator.id, generator);
        Ok(())
    }

    /// Delete a model
    pub fn delete(&self, id: GeneratorId) -> Result<bool, AdminError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Check if a model exists
    pub fn exists(&self, id: GeneratorId) -> Result<bool, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FuelType;
    use tempfile::TempDir;

    fn repo() -> (GeneratorRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = GeneratorRepository::new(temp_dir.path().join("generators.json"));
        (repo, temp_dir)
    }

    fn model(name: &str, brand: &str) -> GeneratorModel {
        GeneratorModel::new(name, brand, FuelType::Diesel, 7.5, 129_900)
    }

    #[test]
    fn test_upsert_and_get() {
        let (repo, _temp) = repo();
        let gen = model("PowerMax 7500E", "Volta");
        let id = gen.id;

        repo.upsert(gen).unwrap();
        assert_eq!(repo.get(id).unwrap().unwrap().name, "PowerMax 7500E");
    }

    #[test]
    fn test_sorted_by_brand_then_name() {
        let (repo, _temp) = repo();
        repo.upsert(model("Zephyr 2", "Aurora")).unwrap();
        repo.upsert(model("Alpha 1", "Volta")).unwrap();
        repo.upsert(model("Beta 3", "Aurora")).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].name, "Beta 3");
        assert_eq!(all[1].name, "Zephyr 2");
        assert_eq!(all[2].name, "Alpha 1");
    }

    #[test]
    fn test_get_active_excludes_archived() {
        let (repo, _temp) = repo();
        let mut archived = model("Old 1000", "Volta");
        archived.archived = true;

        repo.upsert(model("New 2000", "Volta")).unwrap();
        repo.upsert(archived).unwrap();

        assert_eq!(repo.get_active().unwrap().len(), 1);
    }

    #[test]
    fn test_get_by_name() {
        let (repo, _temp) = repo();
        repo.upsert(model("PowerMax 7500E", "Volta")).unwrap();

        assert!(repo.get_by_name("powermax 7500e").unwrap().is_some());
        assert!(repo.get_by_name("missing").unwrap().is_none());
    }
}
