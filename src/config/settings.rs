//! User settings for genadmin
//!
//! Manages operator preferences, currently the default audit query cap.

use serde::{Deserialize, Serialize};

use super::paths::AdminPaths;
use crate::error::AdminError;

/// User settings for genadmin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default result cap for audit log queries, used when `audit list`
    /// is run without `--limit`
    #[serde(default = "default_audit_limit")]
    pub audit_query_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_audit_limit() -> usize {
    100
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            audit_query_limit: default_audit_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AdminPaths) -> Result<Self, AdminError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| AdminError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| AdminError::Json(format!("Failed to parse settings: {}", e)))?;

            Ok(settings)
        } else {
            let settings = Settings::default();
            settings.save(paths)?;
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AdminPaths) -> Result<(), AdminError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AdminError::Json(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AdminError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
