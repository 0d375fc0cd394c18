//! Storage layer for genadmin
//!
//! Provides JSON file storage with atomic writes plus the append-only JSONL
//! audit log.

pub mod admins;
pub mod audit_log;
pub mod customers;
pub mod file_io;
pub mod generators;
pub mod requests;
pub mod tickets;

pub use admins::AdminRepository;
pub use audit_log::AuditLogStore;
pub use customers::CustomerRepository;
pub use file_io::{read_json, write_json_atomic};
pub use generators::GeneratorRepository;
pub use requests::RequestRepository;
pub use tickets::TicketRepository;

use crate::config::paths::AdminPaths;
use crate::error::AdminError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: AdminPaths,
    pub customers: CustomerRepository,
    pub generators: GeneratorRepository,
    pub tickets: TicketRepository,
    pub requests: RequestRepository,
    pub admins: AdminRepository,
    pub audit_log: AuditLogStore,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: AdminPaths) -> Result<Self, AdminError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            customers: CustomerRepository::new(paths.customers_file()),
            generators: GeneratorRepository::new(paths.generators_file()),
            tickets: TicketRepository::new(paths.tickets_file()),
            requests: RequestRepository::new(paths.requests_file()),
            admins: AdminRepository::new(paths.admins_file()),
            audit_log: AuditLogStore::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &AdminPaths {
        &self.paths
    }

    /// Load all collections from disk
    pub fn load_all(&self) -> Result<(), AdminError> {
        self.customers.load()?;
        self.generators.load()?;
        self.tickets.load()?;
        self.requests.load()?;
        self.admins.load()?;
        Ok(())
    }

    /// Save all collections to disk
    pub fn save_all(&self) -> Result<(), AdminError> {
        self.customers.save()?;
        self.generators.save()?;
        self.tickets.save()?;
        self.requests.save()?;
        self.admins.save()?;
        Ok(())
    }

    /// Check if storage has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdminPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_load_all_on_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdminPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        // Missing files read as empty collections
        storage.load_all().unwrap();
        assert!(storage.customers.get_all().unwrap().is_empty());
        assert!(storage.admins.is_empty().unwrap());
    }
}
