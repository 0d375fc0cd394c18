//! Configuration module for genadmin
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Operator settings persistence

pub mod paths;
pub mod settings;

pub use paths::AdminPaths;
pub use settings::Settings;
