//! Custom error types for genadmin
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for genadmin operations
#[derive(Error, Debug)]
pub enum AdminError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// No admin identity is signed in
    #[error("No authenticated admin for this operation")]
    Unauthenticated,

    /// The signed-in admin lacks the required capability
    #[error("Permission denied: {module}.{action} required")]
    PermissionDenied { module: String, action: String },

    /// Illegal state transition (tickets, purchase requests)
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Audit log errors
    #[error("Audit error: {0}")]
    Audit(String),
}

impl AdminError {
    /// Create a "not found" error for customers
    pub fn customer_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Customer",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for generator models
    pub fn generator_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Generator",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for tickets
    pub fn ticket_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Ticket",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for purchase requests
    pub fn request_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "PurchaseRequest",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for admin users
    pub fn admin_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Admin",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a permission failure (missing identity or capability)
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::PermissionDenied { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for genadmin operations
pub type AdminResult<T> = Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AdminError::Config("missing data dir".into());
        assert_eq!(err.to_string(), "Configuration error: missing data dir");
    }

    #[test]
    fn test_not_found_error() {
        let err = AdminError::customer_not_found("cus-1234");
        assert_eq!(err.to_string(), "Customer not found: cus-1234");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_permission_denied_display() {
        let err = AdminError::PermissionDenied {
            module: "tickets".into(),
            action: "delete".into(),
        };
        assert_eq!(err.to_string(), "Permission denied: tickets.delete required");
        assert!(err.is_permission());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let admin_err: AdminError = io_err.into();
        assert!(matches!(admin_err, AdminError::Io(_)));
    }
}
