//! Audit entry data structures
//!
//! Defines the immutable audit record: who did what to which entity, with
//! optional before/after snapshots and the derived change list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::models::{AdminId, AdminRole, AdminUser, AuditEntryId};

use super::diff::derive_changes;

/// Closed enumeration of auditable actions (verb-entity pairs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditAction {
    CreatedCustomer,
    UpdatedCustomer,
    DeactivatedCustomer,
    DeletedCustomer,
    CreatedGenerator,
    UpdatedGenerator,
    ArchivedGenerator,
    UnarchivedGenerator,
    AdjustedGeneratorStock,
    CreatedTicket,
    UpdatedTicket,
    UpdatedTicketStatus,
    AssignedTicket,
    DeletedTicket,
    CreatedRequest,
    UpdatedRequestStatus,
    DeletedRequest,
    CreatedAdmin,
    UpdatedAdmin,
    UpdatedAdminPermissions,
    DeactivatedAdmin,
    DeletedAdmin,
}

impl AuditAction {
    /// Every action, for parsing and CLI help
    pub const ALL: &'static [AuditAction] = &[
        Self::CreatedCustomer,
        Self::UpdatedCustomer,
        Self::DeactivatedCustomer,
        Self::DeletedCustomer,
        Self::CreatedGenerator,
        Self::UpdatedGenerator,
        Self::ArchivedGenerator,
        Self::UnarchivedGenerator,
        Self::AdjustedGeneratorStock,
        Self::CreatedTicket,
        Self::UpdatedTicket,
        Self::UpdatedTicketStatus,
        Self::AssignedTicket,
        Self::DeletedTicket,
        Self::CreatedRequest,
        Self::UpdatedRequestStatus,
        Self::DeletedRequest,
        Self::CreatedAdmin,
        Self::UpdatedAdmin,
        Self::UpdatedAdminPermissions,
        Self::DeactivatedAdmin,
        Self::DeletedAdmin,
    ];

    /// The wire/display tag of this action
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedCustomer => "created-customer",
            Self::UpdatedCustomer => "updated-customer",
            Self::DeactivatedCustomer => "deactivated-customer",
            Self::DeletedCustomer => "deleted-customer",
            Self::CreatedGenerator => "created-generator",
            Self::UpdatedGenerator => "updated-generator",
            Self::ArchivedGenerator => "archived-generator",
            Self::UnarchivedGenerator => "unarchived-generator",
            Self::AdjustedGeneratorStock => "adjusted-generator-stock",
            Self::CreatedTicket => "created-ticket",
            Self::UpdatedTicket => "updated-ticket",
            Self::UpdatedTicketStatus => "updated-ticket-status",
            Self::AssignedTicket => "assigned-ticket",
            Self::DeletedTicket => "deleted-ticket",
            Self::CreatedRequest => "created-request",
            Self::UpdatedRequestStatus => "updated-request-status",
            Self::DeletedRequest => "deleted-request",
            Self::CreatedAdmin => "created-admin",
            Self::UpdatedAdmin => "updated-admin",
            Self::UpdatedAdminPermissions => "updated-admin-permissions",
            Self::DeactivatedAdmin => "deactivated-admin",
            Self::DeletedAdmin => "deleted-admin",
        }
    }

    /// The entity type this action targets
    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::CreatedCustomer
            | Self::UpdatedCustomer
            | Self::DeactivatedCustomer
            | Self::DeletedCustomer => EntityType::Customer,
            Self::CreatedGenerator
            | Self::UpdatedGenerator
            | Self::ArchivedGenerator
            | Self::UnarchivedGenerator
            | Self::AdjustedGeneratorStock => EntityType::Generator,
            Self::CreatedTicket
            | Self::UpdatedTicket
            | Self::UpdatedTicketStatus
            | Self::AssignedTicket
            | Self::DeletedTicket => EntityType::Ticket,
            Self::CreatedRequest | Self::UpdatedRequestStatus | Self::DeletedRequest => {
                EntityType::PurchaseRequest
            }
            Self::CreatedAdmin
            | Self::UpdatedAdmin
            | Self::UpdatedAdminPermissions
            | Self::DeactivatedAdmin
            | Self::DeletedAdmin => EntityType::Admin,
        }
    }

    /// Parse an action from its display tag
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.as_str() == s)
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    Customer,
    Ticket,
    Generator,
    PurchaseRequest,
    Admin,
}

impl EntityType {
    /// Parse an entity type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "customer" => Some(Self::Customer),
            "ticket" => Some(Self::Ticket),
            "generator" => Some(Self::Generator),
            "purchase-request" | "purchase_request" | "request" => Some(Self::PurchaseRequest),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Ticket => write!(f, "ticket"),
            Self::Generator => write!(f, "generator"),
            Self::PurchaseRequest => write!(f, "purchase-request"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Identity of the admin who performed an action, captured at record time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: AdminId,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
}

impl From<&AdminUser> for Actor {
    fn from(admin: &AdminUser) -> Self {
        Self {
            id: admin.id,
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: admin.role,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Reference to the entity an audit entry is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity type tag
    pub entity_type: EntityType,

    /// Display-form entity ID (e.g., "tkt-1a2b3c4d")
    pub entity_id: String,

    /// Human-readable label (customer name, ticket subject, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EntityRef {
    /// Create a new entity reference
    pub fn new(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        label: Option<String>,
    ) -> Self {
        Self {
            entity_type,
            entity_id: entity_id.into(),
            label,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} {} ({})", self.entity_type, self.entity_id, label),
            None => write!(f, "{} {}", self.entity_type, self.entity_id),
        }
    }
}

/// A single immutable audit log entry
///
/// Entries are created once and never mutated or deleted; the log store is
/// append-only. The `changes` list is always derived from `before`/`after`
/// via [`derive_changes`], never authored directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique identifier
    pub id: AuditEntryId,

    /// What happened
    pub action: AuditAction,

    /// Who did it
    pub actor: Actor,

    /// To which entity
    pub target: EntityRef,

    /// Snapshot before the operation (absent for creations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Map<String, Value>>,

    /// Snapshot after the operation (absent for deletions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Map<String, Value>>,

    /// Derived field-level change descriptions
    #[serde(default)]
    pub changes: Vec<String>,

    /// Free-form incidental context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    /// When the entry was recorded (assigned at append time)
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Assemble a new entry, deriving `changes` from the snapshots
    pub fn new(
        actor: Actor,
        action: AuditAction,
        target: EntityRef,
        before: Option<Map<String, Value>>,
        after: Option<Map<String, Value>>,
        metadata: Option<Map<String, Value>>,
    ) -> Self {
        let changes = derive_changes(before.as_ref(), after.as_ref());
        Self {
            id: AuditEntryId::new(),
            action,
            actor,
            target,
            before,
            after,
            changes,
            metadata,
            created_at: Utc::now(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} by {} on {}",
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action,
            self.actor,
            self.target
        );

        for change in &self.changes {
            output.push_str(&format!("\n  {}", change));
        }

        output
    }
}
