//! Admin user model and capability matrix
//!
//! Admin users operate the back office. Each regular admin carries a
//! per-module capability matrix; super-admins are implicitly granted every
//! capability regardless of the stored matrix (the stored flags for a
//! super-admin are never consulted, so they can never drift out of sync).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::email_is_valid;
use super::ids::AdminId;

/// Role of an admin user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
}

impl AdminRole {
    /// Parse role from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "super-admin" | "super_admin" | "superadmin" | "super" => Some(Self::SuperAdmin),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "Super Admin"),
            Self::Admin => write!(f, "Admin"),
        }
    }
}

/// Back-office module a capability applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Module {
    Customers,
    Tickets,
    Generators,
    PurchaseRequests,
    Admins,
    Reports,
}

impl Module {
    /// Every module, in display order
    pub const ALL: &'static [Module] = &[
        Module::Customers,
        Module::Tickets,
        Module::Generators,
        Module::PurchaseRequests,
        Module::Admins,
        Module::Reports,
    ];

    /// Parse a module from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "customers" => Some(Self::Customers),
            "tickets" => Some(Self::Tickets),
            "generators" => Some(Self::Generators),
            "purchase-requests" | "purchase_requests" | "requests" => Some(Self::PurchaseRequests),
            "admins" => Some(Self::Admins),
            "reports" => Some(Self::Reports),
            _ => None,
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customers => write!(f, "customers"),
            Self::Tickets => write!(f, "tickets"),
            Self::Generators => write!(f, "generators"),
            Self::PurchaseRequests => write!(f, "purchase-requests"),
            Self::Admins => write!(f, "admins"),
            Self::Reports => write!(f, "reports"),
        }
    }
}

/// Action a capability grants within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Read => write!(f, "read"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Capability flags for one module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ModulePermissions {
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub update: bool,
    #[serde(default)]
    pub delete: bool,
}

impl ModulePermissions {
    /// All four flags granted
    pub fn all() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }

    /// Read access only
    pub fn read_only() -> Self {
        Self {
            read: true,
            ..Self::default()
        }
    }

    /// Whether the given action is allowed
    pub fn allows(&self, action: PermissionAction) -> bool {
        match action {
            PermissionAction::Create => self.create,
            PermissionAction::Read => self.read,
            PermissionAction::Update => self.update,
            PermissionAction::Delete => self.delete,
        }
    }
}

/// The per-module capability matrix of a regular admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AdminPermissions {
    #[serde(default)]
    pub customers: ModulePermissions,
    #[serde(default)]
    pub tickets: ModulePermissions,
    #[serde(default)]
    pub generators: ModulePermissions,
    #[serde(default)]
    pub purchase_requests: ModulePermissions,
    #[serde(default)]
    pub admins: ModulePermissions,
    #[serde(default)]
    pub reports: ModulePermissions,
}

impl AdminPermissions {
    /// Every capability in every module
    pub fn all() -> Self {
        Self {
            customers: ModulePermissions::all(),
            tickets: ModulePermissions::all(),
            generators: ModulePermissions::all(),
            purchase_requests: ModulePermissions::all(),
            admins: ModulePermissions::all(),
            reports: ModulePermissions::all(),
        }
    }

    /// Read access everywhere, nothing else
    pub fn read_only() -> Self {
        Self {
            customers: ModulePermissions::read_only(),
            tickets: ModulePermissions::read_only(),
            generators: ModulePermissions::read_only(),
            purchase_requests: ModulePermissions::read_only(),
            admins: ModulePermissions::read_only(),
            reports: ModulePermissions::read_only(),
        }
    }

    /// A sensible default grant for a new support admin: full access to
    /// customers, tickets, and purchase requests, read access elsewhere.
    pub fn support_desk() -> Self {
        Self {
            customers: ModulePermissions::all(),
            tickets: ModulePermissions::all(),
            generators: ModulePermissions::read_only(),
            purchase_requests: ModulePermissions::all(),
            admins: ModulePermissions::default(),
            reports: ModulePermissions::read_only(),
        }
    }

    /// Capability flags for one module
    pub fn module(&self, module: Module) -> &ModulePermissions {
        match module {
            Module::Customers => &self.customers,
            Module::Tickets => &self.tickets,
            Module::Generators => &self.generators,
            Module::PurchaseRequests => &self.purchase_requests,
            Module::Admins => &self.admins,
            Module::Reports => &self.reports,
        }
    }

    /// Mutable capability flags for one module
    pub fn module_mut(&mut self, module: Module) -> &mut ModulePermissions {
        match module {
            Module::Customers => &mut self.customers,
            Module::Tickets => &mut self.tickets,
            Module::Generators => &mut self.generators,
            Module::PurchaseRequests => &mut self.purchase_requests,
            Module::Admins => &mut self.admins,
            Module::Reports => &mut self.reports,
        }
    }
}

/// An admin user of the back office
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    /// Unique identifier
    pub id: AdminId,

    /// Display name
    pub name: String,

    /// Sign-in email address (unique)
    pub email: String,

    /// Role
    pub role: AdminRole,

    /// Capability matrix; consulted only for `AdminRole::Admin`
    #[serde(default)]
    pub permissions: AdminPermissions,

    /// Whether the account can sign in
    pub active: bool,

    /// When the admin account was created
    pub created_at: DateTime<Utc>,

    /// When the admin account was last modified
    pub updated_at: DateTime<Utc>,
}

impl AdminUser {
    /// Create a new active admin
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: AdminRole) -> Self {
        let now = Utc::now();
        let permissions = match role {
            AdminRole::SuperAdmin => AdminPermissions::all(),
            AdminRole::Admin => AdminPermissions::support_desk(),
        };
        Self {
            id: AdminId::new(),
            name: name.into(),
            email: email.into(),
            role,
            permissions,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the record as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Whether this admin may perform `action` in `module`
    ///
    /// Super-admins are granted everything without reading the stored matrix.
    pub fn can(&self, module: Module, action: PermissionAction) -> bool {
        match self.role {
            AdminRole::SuperAdmin => true,
            AdminRole::Admin => self.permissions.module(module).allows(action),
        }
    }

    /// Validate the admin record
    pub fn validate(&self) -> Result<(), AdminValidationError> {
        if self.name.trim().is_empty() {
            return Err(AdminValidationError::EmptyName);
        }

        if !email_is_valid(&self.email) {
            return Err(AdminValidationError::InvalidEmail(self.email.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for AdminUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> ({})", self.name, self.email, self.role)
    }
}

/// Validation errors for admin users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminValidationError {
    EmptyName,
    InvalidEmail(String),
}

impl fmt::Display for AdminValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Admin name cannot be empty"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_can_everything() {
        let mut admin = AdminUser::new("Root", "root@example.com", AdminRole::SuperAdmin);
        // Zero out the stored matrix; it must not matter.
        admin.permissions = AdminPermissions::default();

        assert!(admin.can(Module::Admins, PermissionAction::Delete));
        assert!(admin.can(Module::Customers, PermissionAction::Create));
        assert!(admin.can(Module::Reports, PermissionAction::Read));
    }

    #[test]
    fn test_regular_admin_matrix_read_literally() {
        let mut admin = AdminUser::new("Desk", "desk@example.com", AdminRole::Admin);
        admin.permissions = AdminPermissions::read_only();

        assert!(admin.can(Module::Tickets, PermissionAction::Read));
        assert!(!admin.can(Module::Tickets, PermissionAction::Update));
        assert!(!admin.can(Module::Admins, PermissionAction::Delete));
    }

    #[test]
    fn test_support_desk_defaults() {
        let admin = AdminUser::new("Desk", "desk@example.com", AdminRole::Admin);

        assert!(admin.can(Module::Tickets, PermissionAction::Delete));
        assert!(admin.can(Module::Customers, PermissionAction::Create));
        assert!(!admin.can(Module::Generators, PermissionAction::Update));
        assert!(!admin.can(Module::Admins, PermissionAction::Read));
    }

    #[test]
    fn test_module_mut_updates_matrix() {
        let mut perms = AdminPermissions::default();
        perms.module_mut(Module::Generators).update = true;

        assert!(perms.module(Module::Generators).allows(PermissionAction::Update));
        assert!(!perms.module(Module::Generators).allows(PermissionAction::Create));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(AdminRole::parse("super-admin"), Some(AdminRole::SuperAdmin));
        assert_eq!(AdminRole::parse("ADMIN"), Some(AdminRole::Admin));
        assert_eq!(AdminRole::parse("viewer"), None);
    }

    #[test]
    fn test_validate_email() {
        let admin = AdminUser::new("Root", "root-at-example", AdminRole::SuperAdmin);
        assert!(matches!(
            admin.validate(),
            Err(AdminValidationError::InvalidEmail(_))
        ));
    }
}
