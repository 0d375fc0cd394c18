//! Admin session and permission evaluation
//!
//! A [`Session`] carries the identity of the admin performing operations in
//! this process, captured once at sign-in. Identity is passed explicitly to
//! anything that needs it; there is no ambient global state.

use crate::audit::Actor;
use crate::error::{AdminError, AdminResult};
use crate::models::{AdminPermissions, AdminRole, AdminUser, Module, PermissionAction};

/// The signed-in admin identity for this process
#[derive(Debug, Clone)]
pub struct Session {
    signed_in: Option<(Actor, AdminPermissions)>,
}

impl Session {
    /// Create a session with nobody signed in
    pub fn anonymous() -> Self {
        Self { signed_in: None }
    }

    /// Sign in as the given admin
    ///
    /// Deactivated admin accounts are refused.
    pub fn sign_in(admin: &AdminUser) -> AdminResult<Self> {
        if !admin.active {
            return Err(AdminError::Validation(format!(
                "Admin account is deactivated: {}",
                admin.email
            )));
        }

        Ok(Self {
            signed_in: Some((Actor::from(admin), admin.permissions)),
        })
    }

    /// Whether anyone is signed in
    pub fn is_authenticated(&self) -> bool {
        self.signed_in.is_some()
    }

    /// The signed-in actor, or `Unauthenticated`
    pub fn current_actor(&self) -> AdminResult<&Actor> {
        self.signed_in
            .as_ref()
            .map(|(actor, _)| actor)
            .ok_or(AdminError::Unauthenticated)
    }

    /// Whether the signed-in admin may perform `action` in `module`
    ///
    /// Super-admins are granted everything; the stored capability matrix is
    /// consulted only for regular admins. Nobody signed in means no.
    pub fn can(&self, module: Module, action: PermissionAction) -> bool {
        match &self.signed_in {
            Some((actor, _)) if actor.role == AdminRole::SuperAdmin => true,
            Some((_, permissions)) => permissions.module(module).allows(action),
            None => false,
        }
    }

    /// Require a capability, failing closed
    pub fn require(&self, module: Module, action: PermissionAction) -> AdminResult<()> {
        if self.signed_in.is_none() {
            return Err(AdminError::Unauthenticated);
        }

        if !self.can(module, action) {
            return Err(AdminError::PermissionDenied {
                module: module.to_string(),
                action: action.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdminPermissions;

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(matches!(
            session.current_actor(),
            Err(AdminError::Unauthenticated)
        ));
        assert!(!session.can(Module::Customers, PermissionAction::Read));
        assert!(matches!(
            session.require(Module::Customers, PermissionAction::Read),
            Err(AdminError::Unauthenticated)
        ));
    }

    #[test]
    fn test_super_admin_ignores_matrix() {
        let mut admin = AdminUser::new("Root", "root@example.com", AdminRole::SuperAdmin);
        admin.permissions = AdminPermissions::default();

        let session = Session::sign_in(&admin).unwrap();
        assert!(session.can(Module::Admins, PermissionAction::Delete));
        assert!(session.require(Module::Admins, PermissionAction::Delete).is_ok());
    }

    #[test]
    fn test_regular_admin_matrix_enforced() {
        let mut admin = AdminUser::new("Desk", "desk@example.com", AdminRole::Admin);
        admin.permissions = AdminPermissions::read_only();

        let session = Session::sign_in(&admin).unwrap();
        assert!(session.can(Module::Tickets, PermissionAction::Read));
        assert!(!session.can(Module::Tickets, PermissionAction::Delete));
        assert!(matches!(
            session.require(Module::Tickets, PermissionAction::Delete),
            Err(AdminError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn test_deactivated_admin_refused() {
        let mut admin = AdminUser::new("Gone", "gone@example.com", AdminRole::Admin);
        admin.active = false;

        assert!(Session::sign_in(&admin).is_err());
    }

    #[test]
    fn test_actor_captured_at_sign_in() {
        let admin = AdminUser::new("Desk", "desk@example.com", AdminRole::Admin);
        let session = Session::sign_in(&admin).unwrap();

        let actor = session.current_actor().unwrap();
        assert_eq!(actor.id, admin.id);
        assert_eq!(actor.email, "desk@example.com");
    }
}
