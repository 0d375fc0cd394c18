//! Path management for genadmin
//!
//! Provides XDG-compliant path resolution for configuration, data, and the
//! audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `GENADMIN_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/genadmin` or `~/.config/genadmin`
//! 3. Windows: `%APPDATA%\genadmin`

use std::path::PathBuf;

use crate::error::AdminError;

/// Manages all paths used by genadmin
#[derive(Debug, Clone)]
pub struct AdminPaths {
    /// Base directory for all genadmin data
    base_dir: PathBuf,
}

impl AdminPaths {
    /// Create a new AdminPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, AdminError> {
        let base_dir = if let Ok(custom) = std::env::var("GENADMIN_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create AdminPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/genadmin/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/genadmin/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the append-only audit log (JSONL)
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to customers.json
    pub fn customers_file(&self) -> PathBuf {
        self.data_dir().join("customers.json")
    }

    /// Get the path to generators.json (model catalog)
    pub fn generators_file(&self) -> PathBuf {
        self.data_dir().join("generators.json")
    }

    /// Get the path to tickets.json
    pub fn tickets_file(&self) -> PathBuf {
        self.data_dir().join("tickets.json")
    }

    /// Get the path to requests.json (purchase requests)
    pub fn requests_file(&self) -> PathBuf {
        self.data_dir().join("requests.json")
    }

    /// Get the path to admins.json
    pub fn admins_file(&self) -> PathBuf {
        self.data_dir().join("admins.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), AdminError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AdminError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AdminError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if genadmin has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, AdminError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("genadmin"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, AdminError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| AdminError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("genadmin"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdminPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdminPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdminPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.customers_file(),
            temp_dir.path().join("data").join("customers.json")
        );
        assert_eq!(
            paths.admins_file(),
            temp_dir.path().join("data").join("admins.json")
        );
    }
}
