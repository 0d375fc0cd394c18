//! Support ticket service
//!
//! Business logic for the support desk: opening tickets, working them
//! through the status lifecycle, and assigning them to admins.

use serde_json::{Map, Value};

use crate::audit::{AuditAction, AuditRecorder, Snapshot};
use crate::error::{AdminError, AdminResult};
use crate::models::{
    AdminId, CustomerId, Module, PermissionAction, Ticket, TicketId, TicketPriority, TicketStatus,
};
use crate::session::Session;
use crate::storage::Storage;

/// Optional field updates for a ticket
#[derive(Debug, Clone, Default)]
pub struct TicketPatch {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub priority: Option<TicketPriority>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.body.is_none() && self.priority.is_none()
    }
}

/// Service for the support desk
pub struct TicketService<'a> {
    storage: &'a Storage,
    session: &'a Session,
}

impl<'a> TicketService<'a> {
    /// Create a new ticket service
    pub fn new(storage: &'a Storage, session: &'a Session) -> Self {
        Self { storage, session }
    }

    fn recorder(&self) -> AuditRecorder<'_> {
        AuditRecorder::new(&self.storage.audit_log)
    }

    fn get_required(&self, id: TicketId) -> AdminResult<Ticket> {
        self.storage
            .tickets
            .get(id)?
            .ok_or_else(|| AdminError::ticket_not_found(id.to_string()))
    }

    /// Open a new ticket for a customer
    pub fn open(
        &self,
        customer_id: CustomerId,
        subject: &str,
        body: &str,
        priority: TicketPriority,
    ) -> AdminResult<Ticket> {
        self.session.require(Module::Tickets, PermissionAction::Create)?;

        if !self.storage.customers.exists(customer_id)? {
            return Err(AdminError::customer_not_found(customer_id.to_string()));
        }

        let mut ticket = Ticket::new(customer_id, subject.trim());
        ticket.body = body.to_string();
        ticket.priority = priority;
        ticket
            .validate()
            .map_err(|e| AdminError::Validation(e.to_string()))?;

        self.storage.tickets.upsert(ticket.clone())?;
        self.storage.tickets.save()?;

        let after = Snapshot::from(&ticket);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::CreatedTicket,
            after.entity_ref(),
            None,
            Some(&after),
            None,
        );

        Ok(ticket)
    }

    /// Get a ticket by ID
    pub fn get(&self, id: TicketId) -> AdminResult<Option<Ticket>> {
        self.session.require(Module::Tickets, PermissionAction::Read)?;
        self.storage.tickets.get(id)
    }

    /// List all tickets, newest first
    pub fn list(&self) -> AdminResult<Vec<Ticket>> {
        self.session.require(Module::Tickets, PermissionAction::Read)?;
        self.storage.tickets.get_all()
    }

    /// List tickets in a given status, newest first
    pub fn list_by_status(&self, status: TicketStatus) -> AdminResult<Vec<Ticket>> {
        self.session.require(Module::Tickets, PermissionAction::Read)?;
        self.storage.tickets.get_by_status(status)
    }

    /// List tickets opened by a customer, newest first
    pub fn list_for_customer(&self, customer_id: CustomerId) -> AdminResult<Vec<Ticket>> {
        self.session.require(Module::Tickets, PermissionAction::Read)?;
        self.storage.tickets.get_by_customer(customer_id)
    }

    /// Apply a patch to a ticket
    pub fn update(&self, id: TicketId, patch: TicketPatch) -> AdminResult<Ticket> {
        self.session.require(Module::Tickets, PermissionAction::Update)?;

        if patch.is_empty() {
            return Err(AdminError::Validation("No fields to update".to_string()));
        }

        let before = self.get_required(id)?;

        let mut ticket = before.clone();
        if let Some(subject) = patch.subject {
            ticket.subject = subject;
        }
        if let Some(body) = patch.body {
            ticket.body = body;
        }
        if let Some(priority) = patch.priority {
            ticket.priority = priority;
        }
        ticket.touch();

        ticket
            .validate()
            .map_err(|e| AdminError::Validation(e.to_string()))?;

        self.storage.tickets.upsert(ticket.clone())?;
        self.storage.tickets.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&ticket);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::UpdatedTicket,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(ticket)
    }

    /// Move a ticket to a new status
    pub fn set_status(&self, id: TicketId, status: TicketStatus) -> AdminResult<Ticket> {
        self.session.require(Module::Tickets, PermissionAction::Update)?;

        let before = self.get_required(id)?;
        if before.status == status {
            return Ok(before);
        }

        let mut ticket = before.clone();
        ticket.status = status;
        ticket.touch();

        self.storage.tickets.upsert(ticket.clone())?;
        self.storage.tickets.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&ticket);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::UpdatedTicketStatus,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(ticket)
    }

    /// Assign a ticket to an admin, or clear the assignment
    pub fn assign(&self, id: TicketId, admin_id: Option<AdminId>) -> AdminResult<Ticket> {
        self.session.require(Module::Tickets, PermissionAction::Update)?;

        if let Some(admin_id) = admin_id {
            let admin = self
                .storage
                .admins
                .get(admin_id)?
                .ok_or_else(|| AdminError::admin_not_found(admin_id.to_string()))?;
            if !admin.active {
                return Err(AdminError::Validation(format!(
                    "Cannot assign ticket to deactivated admin {}",
                    admin.name
                )));
            }
        }

        let before = self.get_required(id)?;

        let mut ticket = before.clone();
        ticket.assigned_to = admin_id;
        ticket.touch();

        self.storage.tickets.upsert(ticket.clone())?;
        self.storage.tickets.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&ticket);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::AssignedTicket,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(ticket)
    }

    /// Delete a ticket permanently
    pub fn delete(&self, id: TicketId) -> AdminResult<()> {
        self.session.require(Module::Tickets, PermissionAction::Delete)?;

        let ticket = self.get_required(id)?;

        self.storage.tickets.delete(id)?;
        self.storage.tickets.save()?;

        let before_snap = Snapshot::from(&ticket);
        let mut metadata = Map::new();
        metadata.insert(
            "customer_id".to_string(),
            Value::String(ticket.customer_id.to_string()),
        );
        self.recorder().record_best_effort(
            self.session,
            AuditAction::DeletedTicket,
            before_snap.entity_ref(),
            Some(&before_snap),
            None,
            Some(metadata),
        );

        Ok(())
    }
}
