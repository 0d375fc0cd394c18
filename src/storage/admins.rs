//! Admin user repository for JSON storage
//!
//! Manages loading and saving admin accounts to admins.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::AdminError;
use crate::models::{AdminId, AdminRole, AdminUser};

use super::file_io::{read_json, write_json_atomic};

/// Serializable admin data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AdminData {
    admins: Vec<AdminUser>,
}

/// Repository for admin account persistence
pub struct AdminRepository {
    path: PathBuf,
    data: RwLock<HashMap<AdminId, AdminUser>>,
}

impl AdminRepository {
    /// Create a new admin repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load admins from disk
    pub fn load(&self) -> Result<(), AdminError> {
        let file_data: AdminData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for admin in file_data.admins {
            data.insert(admin.id, admin);
        }

        Ok(())
    }

    /// Save admins to disk
    pub fn save(&self) -> Result<(), AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = AdminData {
            admins: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get an admin by ID
    pub fn get(&self, id: AdminId) -> Result<Option<AdminUser>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all admins, sorted by name
    pub fn get_all(&self) -> Result<Vec<AdminUser>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut admins: Vec<_> = data.values().cloned().collect();
        admins.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(admins)
    }

    /// Get an admin by sign-in email (case-insensitive)
    pub fn get_by_email(&self, email: &str) -> Result<Option<AdminUser>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let email_lower = email.to_lowercase();
        Ok(data
            .values()
            .find(|a| a.email.to_lowercase() == email_lower)
            .cloned())
    }

    /// Check if an email is already taken
    pub fn email_exists(&self, email: &str, exclude_id: Option<AdminId>) -> Result<bool, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let email_lower = email.to_lowercase();
        Ok(data
            .values()
            .any(|a| a.email.to_lowercase() == email_lower && Some(a.id) != exclude_id))
    }

    /// Count active super-admins
    pub fn active_super_admin_count(&self) -> Result<usize, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .filter(|a| a.active && a.role == AdminRole::SuperAdmin)
            .count())
    }

    /// Insert or update an admin
    pub fn upsert(&self, admin: AdminUser) -> Result<(), AdminError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(admin.id, admin);
        Ok(())
    }

    /// Delete an admin
    pub fn delete(&self, id: AdminId) -> Result<bool, AdminError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Check if any admin exists at all (first-run detection)
    pub fn is_empty(&self) -> Result<bool, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (AdminRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = AdminRepository::new(temp_dir.path().join("admins.json"));
        (repo, temp_dir)
    }

    #[test]
    fn test_upsert_and_get_by_email() {
        let (repo, _temp) = repo();
        repo.upsert(AdminUser::new("Root", "Root@Example.com", AdminRole::SuperAdmin))
            .unwrap();

        assert!(repo.get_by_email("root@example.com").unwrap().is_some());
        assert!(repo.email_exists("ROOT@example.com", None).unwrap());
    }

    #[test]
    fn test_active_super_admin_count() {
        let (repo, _temp) = repo();
        let mut inactive = AdminUser::new("Old Root", "old@example.com", AdminRole::SuperAdmin);
        inactive.active = false;

        repo.upsert(AdminUser::new("Root", "root@example.com", AdminRole::SuperAdmin))
            .unwrap();
        repo.upsert(AdminUser::new("Desk", "desk@example.com", AdminRole::Admin))
            .unwrap();
        repo.upsert(inactive).unwrap();

        assert_eq!(repo.active_super_admin_count().unwrap(), 1);
    }

    #[test]
    fn test_is_empty_first_run() {
        let (repo, _temp) = repo();
        assert!(repo.is_empty().unwrap());

        repo.upsert(AdminUser::new("Root", "root@example.com", AdminRole::SuperAdmin))
            .unwrap();
        assert!(!repo.is_empty().unwrap());
    }

    #[test]
    fn test_save_and_load_preserves_permissions() {
        let (repo, _temp) = repo();
        let admin = AdminUser::new("Desk", "desk@example.com", AdminRole::Admin);
        let id = admin.id;
        repo.upsert(admin).unwrap();
        repo.save().unwrap();

        let repo2 = AdminRepository::new(repo.path.clone());
        repo2.load().unwrap();

        let loaded = repo2.get(id).unwrap().unwrap();
        assert!(loaded.permissions.tickets.create);
        assert!(!loaded.permissions.admins.read);
    }
}
