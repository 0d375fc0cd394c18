//! Customer repository for JSON storage
//!
//! Manages loading and saving customer accounts to customers.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::AdminError;
use crate::models::{Customer, CustomerId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable customer data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CustomerData {
    customers: Vec<Customer>,
}

/// Repository for customer persistence
pub struct CustomerRepository {
    path: PathBuf,
    data: RwLock<HashMap<CustomerId, Customer>>,
}

impl CustomerRepository {
    /// Create a new customer repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load customers from disk
    pub fn load(&self) -> Result<(), AdminError> {
        let file_data: CustomerData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for customer in file_data.customers {
            data.insert(customer.id, customer);
        }

        Ok(())
    }

    /// Save customers to disk
    pub fn save(&self) -> Result<(), AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = CustomerData {
            customers: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a customer by ID
    pub fn get(&self, id: CustomerId) -> Result<Option<Customer>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all customers, sorted by name
    pub fn get_all(&self) -> Result<Vec<Customer>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut customers: Vec<_> = data.values().cloned().collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    /// Get all active customers
    pub fn get_active(&self) -> Result<Vec<Customer>, AdminError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|c| c.active).collect())
    }

    /// Get a customer by email (case-insensitive)
    pub fn get_by_email(&self, email: &str) -> Result<Option<Customer>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let email_lower = email.to_lowercase();
        Ok(data
            .values()
            .find(|c| c.email.to_lowercase() == email_lower)
            .cloned())
    }

    /// Check if an email is already taken
    pub fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<CustomerId>,
    ) -> Result<bool, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let email_lower = email.to_lowercase();
        Ok(data
            .values()
            .any(|c| c.email.to_lowercase() == email_lower && Some(c.id) != exclude_id))
    }

    /// Insert or update a customer
    pub fn upsert(&self, customer: Customer) -> Result<(), AdminError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(customer.id, customer);
        Ok(())
    }

    /// Delete a customer
    pub fn delete(&self, id: CustomerId) -> Result<bool, AdminError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Check if a customer exists
    pub fn exists(&self, id: CustomerId) -> Result<bool, AdminError> {
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
    use tempfile::TempDir;

    fn repo() -> (CustomerRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CustomerRepository::new(temp_dir.path().join("customers.json"));
        (repo, temp_dir)
    }

    #[test]
    fn test_upsert_get_delete() {
        let (repo, _temp) = repo();
        let customer = Customer::new("Amara Diallo", "amara@example.com");
        let id = customer.id;

        repo.upsert(customer).unwrap();
        assert!(repo.exists(id).unwrap());
        assert_eq!(repo.get(id).unwrap().unwrap().name, "Amara Diallo");

        assert!(repo.delete(id).unwrap());
        assert!(!repo.exists(id).unwrap());
        assert!(!repo.delete(id).unwrap());
    }

    #[test]
    fn test_save_and_load() {
        let (repo, _temp) = repo();
        let customer = Customer::new("Amara Diallo", "amara@example.com");
        let id = customer.id;

        repo.upsert(customer).unwrap();
        repo.save().unwrap();

        let repo2 = CustomerRepository::new(repo.path.clone());
        repo2.load().unwrap();
        assert!(repo2.exists(id).unwrap());
    }

    #[test]
    fn test_email_lookup_case_insensitive() {
        let (repo, _temp) = repo();
        repo.upsert(Customer::new("Amara Diallo", "Amara@Example.com"))
            .unwrap();

        let found = repo.get_by_email("amara@example.COM").unwrap();
        assert!(found.is_some());
        assert!(repo.email_exists("amara@example.com", None).unwrap());
    }

    #[test]
    fn test_email_exists_excludes_self() {
        let (repo, _temp) = repo();
        let customer = Customer::new("Amara Diallo", "amara@example.com");
        let id = customer.id;
        repo.upsert(customer).unwrap();

        assert!(!repo.email_exists("amara@example.com", Some(id)).unwrap());
    }

    #[test]
    fn test_get_active_filters() {
        let (repo, _temp) = repo();
        let mut inactive = Customer::new("Gone", "gone@example.com");
        inactive.active = false;

        repo.upsert(Customer::new("Here", "here@example.com")).unwrap();
        repo.upsert(inactive).unwrap();

        assert_eq!(repo.get_all().unwrap().len(), 2);
        assert_eq!(repo.get_active().unwrap().len(), 1);
    }
}
