//! Purchase request repository for JSON storage
//!
//! Manages loading and saving purchase requests to requests.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::AdminError;
use crate::models::{CustomerId, PurchaseRequest, RequestId, RequestStatus};

use super::file_io::{read_json, write_json_atomic};

/// Serializable request data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RequestData {
    requests: Vec<PurchaseRequest>,
}

/// Repository for purchase request persistence
pub struct RequestRepository {
    path: PathBuf,
    data: RwLock<HashMap<RequestId, PurchaseRequest>>,
}

impl RequestRepository {
    /// Create a new request repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load requests from disk
    pub fn load(&self) -> Result<(), AdminError> {
        let file_data: RequestData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for request in file_data.requests {
            data.insert(request.id, request);
        }

        Ok(())
    }

    /// Save requests to disk
    pub fn save(&self) -> Result<(), AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = RequestData {
            requests: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a request by ID
    pub fn get(&self, id: RequestId) -> Result<Option<PurchaseRequest>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all requests, newest first
    pub fn get_all(&self) -> Result<Vec<PurchaseRequest>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut requests: Vec<_> = data.values().cloned().collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    /// Get all requests from a customer, newest first
    pub fn get_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<PurchaseRequest>, AdminError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|r| r.customer_id == customer_id)
            .collect())
    }

    /// Get all requests in a given status, newest first
    pub fn get_by_status(&self, status: RequestStatus) -> Result<Vec<PurchaseRequest>, AdminError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|r| r.status == status).collect())
    }

    /// Insert or update a request
    pub fn upsert(&self, request: PurchaseRequest) -> Result<(), AdminError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(request.id, request);
        Ok(())
    }

    /// Delete a request
    pub fn delete(&self, id: RequestId) -> Result<bool, AdminError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeneratorId;
    use tempfile::TempDir;

    fn repo() -> (RequestRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = RequestRepository::new(temp_dir.path().join("requests.json"));
        (repo, temp_dir)
    }

    #[test]
    fn test_upsert_get_delete() {
        let (repo, _temp) = repo();
        let request = PurchaseRequest::new(CustomerId::new(), GeneratorId::new(), 2);
        let id = request.id;

        repo.upsert(request).unwrap();
        assert!(repo.get(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_get_by_customer_and_status() {
        let (repo, _temp) = repo();
        let customer = CustomerId::new();

        let mut approved = PurchaseRequest::new(customer, GeneratorId::new(), 1);
        approved.status = RequestStatus::Approved;

        repo.upsert(PurchaseRequest::new(customer, GeneratorId::new(), 3))
            .unwrap();
        repo.upsert(approved).unwrap();
        repo.upsert(PurchaseRequest::new(CustomerId::new(), GeneratorId::new(), 1))
            .unwrap();

        assert_eq!(repo.get_by_customer(customer).unwrap().len(), 2);
        assert_eq!(repo.get_by_status(RequestStatus::Pending).unwrap().len(), 2);
        assert_eq!(repo.get_by_status(RequestStatus::Approved).unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (repo, _temp) = repo();
        let request = PurchaseRequest::new(CustomerId::new(), GeneratorId::new(), 2);
        let id = request.id;

        repo.upsert(request).unwrap();
        repo.save().unwrap();

        let repo2 = RequestRepository::new(repo.path.clone());
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().quantity, 2);
    }
}
