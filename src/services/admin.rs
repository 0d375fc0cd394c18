//! Admin account service
//!
//! Business logic for managing the admin accounts themselves. Guards the
//! invariant that at least one active super-admin always remains.

use crate::audit::{Actor, AuditAction, AuditRecorder, Snapshot};
use crate::error::{AdminError, AdminResult};
use crate::models::{
    AdminId, AdminPermissions, AdminRole, AdminUser, Module, PermissionAction,
};
use crate::session::Session;
use crate::storage::Storage;

/// Optional field updates for an admin account
#[derive(Debug, Clone, Default)]
pub struct AdminPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<AdminRole>,
}

impl AdminPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }
}

/// Service for admin account management
pub struct AdminService<'a> {
    storage: &'a Storage,
    session: &'a Session,
}

impl<'a> AdminService<'a> {
    /// Create a new admin service
    pub fn new(storage: &'a Storage, session: &'a Session) -> Self {
        Self { storage, session }
    }

    fn recorder(&self) -> AuditRecorder<'_> {
        AuditRecorder::new(&self.storage.audit_log)
    }

    fn get_required(&self, id: AdminId) -> AdminResult<AdminUser> {
        self.storage
            .admins
            .get(id)?
            .ok_or_else(|| AdminError::admin_not_found(id.to_string()))
    }

    fn require_super_admin(&self) -> AdminResult<&Actor> {
        let actor = self.session.current_actor()?;
        if actor.role != AdminRole::SuperAdmin {
            return Err(AdminError::PermissionDenied {
                module: Module::Admins.to_string(),
                action: PermissionAction::Delete.to_string(),
            });
        }
        Ok(actor)
    }

    // Would this change leave the system without an active super-admin?
    fn guard_last_super_admin(&self, target: &AdminUser) -> AdminResult<()> {
        if target.active && target.role == AdminRole::SuperAdmin {
            let remaining = self.storage.admins.active_super_admin_count()?;
            if remaining <= 1 {
                return Err(AdminError::Validation(
                    "Cannot remove the last active super-admin".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Create a new admin account
    pub fn create(
        &self,
        name: &str,
        email: &str,
        role: AdminRole,
        permissions: Option<AdminPermissions>,
    ) -> AdminResult<AdminUser> {
        self.session.require(Module::Admins, PermissionAction::Create)?;

        let mut admin = AdminUser::new(name.trim(), email.trim().to_lowercase(), role);
        if let Some(permissions) = permissions {
            admin.permissions = permissions;
        }
        admin
            .validate()
            .map_err(|e| AdminError::Validation(e.to_string()))?;

        if self.storage.admins.email_exists(&admin.email, None)? {
            return Err(AdminError::Duplicate {
                entity_type: "Admin",
                identifier: admin.email.clone(),
            });
        }

        self.storage.admins.upsert(admin.clone())?;
        self.storage.admins.save()?;

        let after = Snapshot::from(&admin);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::CreatedAdmin,
            after.entity_ref(),
            None,
            Some(&after),
            None,
        );

        Ok(admin)
    }

    /// Get an admin by ID
    pub fn get(&self, id: AdminId) -> AdminResult<Option<AdminUser>> {
        self.session.require(Module::Admins, PermissionAction::Read)?;
        self.storage.admins.get(id)
    }

    /// Find an admin by email
    pub fn find_by_email(&self, email: &str) -> AdminResult<Option<AdminUser>> {
        self.session.require(Module::Admins, PermissionAction::Read)?;
        self.storage.admins.get_by_email(email)
    }

    /// List all admins, sorted by name
    pub fn list(&self) -> AdminResult<Vec<AdminUser>> {
        self.session.require(Module::Admins, PermissionAction::Read)?;
        self.storage.admins.get_all()
    }

    /// Apply a patch to an admin account
    pub fn update(&self, id: AdminId, patch: AdminPatch) -> AdminResult<AdminUser> {
        self.session.require(Module::Admins, PermissionAction::Update)?;

        if patch.is_empty() {
            return Err(AdminError::Validation("No fields to update".to_string()));
        }

        let before = self.get_required(id)?;

        // Demoting the last active super-admin is a removal in disguise
        if matches!(patch.role, Some(AdminRole::Admin)) && before.role == AdminRole::SuperAdmin {
            self.guard_last_super_admin(&before)?;
        }

        let mut admin = before.clone();
        if let Some(name) = patch.name {
            admin.name = name;
        }
        if let Some(email) = patch.email {
            admin.email = email.to_lowercase();
        }
        if let Some(role) = patch.role {
            admin.role = role;
        }
        admin.touch();

        admin
            .validate()
            .map_err(|e| AdminError::Validation(e.to_string()))?;

        if self.storage.admins.email_exists(&admin.email, Some(id))? {
            return Err(AdminError::Duplicate {
                entity_type: "Admin",
                identifier: admin.email.clone(),
            });
        }

        self.storage.admins.upsert(admin.clone())?;
        self.storage.admins.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&admin);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::UpdatedAdmin,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(admin)
    }

    /// Replace an admin's capability matrix
    pub fn set_permissions(
        &self,
        id: AdminId,
        permissions: AdminPermissions,
    ) -> AdminResult<AdminUser> {
        self.session.require(Module::Admins, PermissionAction::Update)?;

        let before = self.get_required(id)?;

        let mut admin = before.clone();
        admin.permissions = permissions;
        admin.touch();

        self.storage.admins.upsert(admin.clone())?;
        self.storage.admins.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&admin);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::UpdatedAdminPermissions,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(admin)
    }

    /// Deactivate an admin account
    ///
    /// The last active super-admin cannot be deactivated.
    pub fn deactivate(&self, id: AdminId) -> AdminResult<AdminUser> {
        self.session.require(Module::Admins, PermissionAction::Update)?;

        let before = self.get_required(id)?;
        if !before.active {
            return Ok(before);
        }

        self.guard_last_super_admin(&before)?;

        let mut admin = before.clone();
        admin.active = false;
        admin.touch();

        self.storage.admins.upsert(admin.clone())?;
        self.storage.admins.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&admin);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::DeactivatedAdmin,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(admin)
    }

    /// Delete an admin account permanently
    ///
    /// Super-admin only. Self-deletion is refused, as is removing the last
    /// active super-admin.
    pub fn delete(&self, id: AdminId) -> AdminResult<()> {
        let actor = self.require_super_admin()?;

        if actor.id == id {
            return Err(AdminError::Validation(
                "Admins cannot delete their own account".to_string(),
            ));
        }

        let admin = self.get_required(id)?;
        self.guard_last_super_admin(&admin)?;

        self.storage.admins.delete(id)?;
        self.storage.admins.save()?;

        let before_snap = Snapshot::from(&admin);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::DeletedAdmin,
            before_snap.entity_ref(),
            Some(&before_snap),
            None,
            None,
        );

        Ok(())
    }
}
