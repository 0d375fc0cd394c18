//! Admin account CLI commands
//!
//! Implements CLI commands for managing admin accounts and their
//! capability matrix.

use clap::Subcommand;

use crate::display::admin::{format_admin_details, format_admin_list};
use crate::error::{AdminError, AdminResult};
use crate::models::{AdminPermissions, AdminRole, AdminUser, Module};
use crate::services::{AdminPatch, AdminService};
use crate::session::Session;
use crate::storage::Storage;

/// Admin account subcommands
#[derive(Subcommand)]
pub enum AdminCommands {
    /// Create a new admin account
    Create {
        /// Admin name
        name: String,
        /// Sign-in email
        email: String,
        /// Role (super-admin, admin)
        #[arg(short, long, default_value = "admin")]
        role: String,
        /// Start from a permission preset (all, read-only, support-desk)
        #[arg(long)]
        preset: Option<String>,
    },
    /// List admin accounts
    List,
    /// Show admin details and capability matrix
    Show {
        /// Admin email
        admin: String,
    },
    /// Edit an admin account
    Edit {
        /// Admin email
        admin: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New email
        #[arg(long)]
        email: Option<String>,
        /// New role (super-admin, admin)
        #[arg(long)]
        role: Option<String>,
    },
    /// Grant a capability (module.action, e.g. tickets.delete)
    Grant {
        /// Admin email
        admin: String,
        /// Capability as module.action
        capability: String,
    },
    /// Revoke a capability (module.action, e.g. tickets.delete)
    Revoke {
        /// Admin email
        admin: String,
        /// Capability as module.action
        capability: String,
    },
    /// Deactivate an admin account
    Deactivate {
        /// Admin email
        admin: String,
    },
    /// Delete an admin account (super-admin only)
    Delete {
        /// Admin email
        admin: String,
    },
}

fn parse_role(s: &str) -> AdminResult<AdminRole> {
    AdminRole::parse(s).ok_or_else(|| {
        AdminError::Validation(format!(
            "Invalid role: '{}'. Valid roles: super-admin, admin",
            s
        ))
    })
}

fn parse_preset(s: &str) -> AdminResult<AdminPermissions> {
    match s.to_lowercase().as_str() {
        "all" => Ok(AdminPermissions::all()),
        "read-only" | "readonly" => Ok(AdminPermissions::read_only()),
        "support-desk" | "support" => Ok(AdminPermissions::support_desk()),
        _ => Err(AdminError::Validation(format!(
            "Invalid preset: '{}'. Valid presets: all, read-only, support-desk",
            s
        ))),
    }
}

// Split "tickets.delete" into its module and action halves
fn parse_capability(s: &str) -> AdminResult<(Module, &str)> {
    let (module, action) = s.split_once('.').ok_or_else(|| {
        AdminError::Validation(format!(
            "Invalid capability: '{}'. Use module.action, e.g. tickets.delete",
            s
        ))
    })?;

    let module = Module::parse(module).ok_or_else(|| {
        AdminError::Validation(format!(
            "Invalid module: '{}'. Valid modules: customers, tickets, generators, purchase-requests, admins, reports",
            module
        ))
    })?;

    if !matches!(action, "create" | "read" | "update" | "delete") {
        return Err(AdminError::Validation(format!(
            "Invalid action: '{}'. Valid actions: create, read, update, delete",
            action
        )));
    }

    Ok((module, action))
}

fn resolve_admin(service: &AdminService, email: &str) -> AdminResult<AdminUser> {
    service
        .find_by_email(email)?
        .ok_or_else(|| AdminError::admin_not_found(email))
}

fn apply_capability(
    service: &AdminService,
    admin: &AdminUser,
    capability: &str,
    allow: bool,
) -> AdminResult<()> {
    let (module, action) = parse_capability(capability)?;

    let mut permissions = admin.permissions;
    let module_permissions = permissions.module_mut(module);
    match action {
        "create" => module_permissions.create = allow,
        "read" => module_permissions.read = allow,
        "update" => module_permissions.update = allow,
        "delete" => module_permissions.delete = allow,
        _ => unreachable!(),
    }

    service.set_permissions(admin.id, permissions)?;
    println!(
        "{} {} for {}",
        if allow { "Granted" } else { "Revoked" },
        capability,
        admin.email
    );
    Ok(())
}

/// Handle an admin account command
pub fn handle_admin_command(
    storage: &Storage,
    session: &Session,
    cmd: AdminCommands,
) -> AdminResult<()> {
    let service = AdminService::new(storage, session);

    match cmd {
        AdminCommands::Create {
            name,
            email,
            role,
            preset,
        } => {
            let role = parse_role(&role)?;
            let permissions = preset.as_deref().map(parse_preset).transpose()?;
            let admin = service.create(&name, &email, role, permissions)?;

            println!("Created admin: {}", admin.name);
            println!("  Email: {}", admin.email);
            println!("  Role:  {}", admin.role);
            println!("  ID:    {}", admin.id);
        }

        AdminCommands::List => {
            let admins = service.list()?;
            print!("{}", format_admin_list(&admins));
        }

        AdminCommands::Show { admin } => {
            let found = resolve_admin(&service, &admin)?;
            print!("{}", format_admin_details(&found));
        }

        AdminCommands::Edit {
            admin,
            name,
            email,
            role,
        } => {
            let found = resolve_admin(&service, &admin)?;

            let role = role.as_deref().map(parse_role).transpose()?;
            let patch = AdminPatch { name, email, role };
            if patch.is_empty() {
                println!("No changes specified. Use --name, --email, or --role.");
                return Ok(());
            }

            let updated = service.update(found.id, patch)?;
            println!("Updated admin: {}", updated.name);
        }

        AdminCommands::Grant { admin, capability } => {
            let found = resolve_admin(&service, &admin)?;
            apply_capability(&service, &found, &capability, true)?;
        }

        AdminCommands::Revoke { admin, capability } => {
            let found = resolve_admin(&service, &admin)?;
            apply_capability(&service, &found, &capability, false)?;
        }

        AdminCommands::Deactivate { admin } => {
            let found = resolve_admin(&service, &admin)?;
            let deactivated = service.deactivate(found.id)?;
            println!("Deactivated admin: {}", deactivated.name);
        }

        AdminCommands::Delete { admin } => {
            let found = resolve_admin(&service, &admin)?;
            service.delete(found.id)?;
            println!("Deleted admin: {}", found.name);
        }
    }

    Ok(())
}
