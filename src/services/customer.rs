//! Customer service
//!
//! Business logic for customer accounts: CRUD, deactivation, and the
//! privileged cascading account deletion.

use crate::audit::{AuditAction, AuditRecorder, Snapshot};
use crate::error::{AdminError, AdminResult};
use crate::models::{Customer, CustomerId, Module, PermissionAction};
use crate::session::Session;
use crate::storage::Storage;

/// Optional field updates for a customer
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl CustomerPatch {
    /// Whether the patch changes anything
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.address.is_none()
            && self.notes.is_none()
    }
}

/// Outcome of a cascading account deletion
#[derive(Debug, Clone)]
pub struct AccountDeletion {
    pub customer: Customer,
    pub tickets_removed: usize,
    pub requests_removed: usize,
}

/// Service for customer management
pub struct CustomerService<'a> {
    storage: &'a Storage,
    session: &'a Session,
}

impl<'a> CustomerService<'a> {
    /// Create a new customer service
    pub fn new(storage: &'a Storage, session: &'a Session) -> Self {
        Self { storage, session }
    }

    fn recorder(&self) -> AuditRecorder<'_> {
        AuditRecorder::new(&self.storage.audit_log)
    }

    /// Create a new customer account
    pub fn create(&self, name: &str, email: &str) -> AdminResult<Customer> {
        self.session.require(Module::Customers, PermissionAction::Create)?;

        let customer = Customer::new(name.trim(), email.trim());
        customer
            .validate()
            .map_err(|e| AdminError::Validation(e.to_string()))?;

        if self.storage.customers.email_exists(&customer.email, None)? {
            return Err(AdminError::Duplicate {
                entity_type: "Customer",
                identifier: customer.email.clone(),
            });
        }

        self.storage.customers.upsert(customer.clone())?;
        self.storage.customers.save()?;

        let after = Snapshot::from(&customer);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::CreatedCustomer,
            after.entity_ref(),
            None,
            Some(&after),
            None,
        );

        Ok(customer)
    }

    /// Get a customer by ID
    pub fn get(&self, id: CustomerId) -> AdminResult<Option<Customer>> {
        self.session.require(Module::Customers, PermissionAction::Read)?;
        self.storage.customers.get(id)
    }

    /// Find a customer by email or ID string
    pub fn find(&self, identifier: &str) -> AdminResult<Option<Customer>> {
        self.session.require(Module::Customers, PermissionAction::Read)?;

        if let Some(customer) = self.storage.customers.get_by_email(identifier)? {
            return Ok(Some(customer));
        }

        if let Ok(id) = identifier.parse::<CustomerId>() {
            return self.storage.customers.get(id);
        }

        Ok(None)
    }

    /// List customers
    pub fn list(&self, include_inactive: bool) -> AdminResult<Vec<Customer>> {
        self.session.require(Module::Customers, PermissionAction::Read)?;

        if include_inactive {
            self.storage.customers.get_all()
        } else {
            self.storage.customers.get_active()
        }
    }

    /// Apply a patch to a customer
    pub fn update(&self, id: CustomerId, patch: CustomerPatch) -> AdminResult<Customer> {
        self.session.require(Module::Customers, PermissionAction::Update)?;

        let before = self
            .storage
            .customers
            .get(id)?
            .ok_or_else(|| AdminError::customer_not_found(id.to_string()))?;

        let mut customer = before.clone();
        if let Some(name) = patch.name {
            customer.name = name;
        }
        if let Some(email) = patch.email {
            customer.email = email;
        }
        if let Some(phone) = patch.phone {
            customer.phone = phone;
        }
        if let Some(company) = patch.company {
            customer.company = company;
        }
        if let Some(address) = patch.address {
            customer.address = address;
        }
        if let Some(notes) = patch.notes {
            customer.notes = notes;
        }
        customer.touch();

        customer
            .validate()
            .map_err(|e| AdminError::Validation(e.to_string()))?;

        if self.storage.customers.email_exists(&customer.email, Some(id))? {
            return Err(AdminError::Duplicate {
                entity_type: "Customer",
                identifier: customer.email.clone(),
            });
        }

        self.storage.customers.upsert(customer.clone())?;
        self.storage.customers.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&customer);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::UpdatedCustomer,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(customer)
    }

    /// Deactivate a customer (kept for history)
    pub fn deactivate(&self, id: CustomerId) -> AdminResult<Customer> {
        self.session.require(Module::Customers, PermissionAction::Update)?;

        let before = self
            .storage
            .customers
            .get(id)?
            .ok_or_else(|| AdminError::customer_not_found(id.to_string()))?;

        let mut customer = before.clone();
        customer.active = false;
        customer.touch();

        self.storage.customers.upsert(customer.clone())?;
        self.storage.customers.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&customer);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::DeactivatedCustomer,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(customer)
    }

    /// Delete a customer account and everything attached to it
    ///
    /// Removes the customer plus all of their tickets and purchase requests.
    /// Every removed record gets its own audit entry; the customer entry
    /// carries cascade counts as metadata.
    pub fn delete_account(&self, id: CustomerId) -> AdminResult<AccountDeletion> {
        self.session.require(Module::Customers, PermissionAction::Delete)?;

        let customer = self
            .storage
            .customers
            .get(id)?
            .ok_or_else(|| AdminError::customer_not_found(id.to_string()))?;

        let recorder = self.recorder();

        let tickets = self.storage.tickets.get_by_customer(id)?;
        for ticket in &tickets {
            self.storage.tickets.delete(ticket.id)?;
            let snap = Snapshot::from(ticket);
            recorder.record_best_effort(
                self.session,
                AuditAction::DeletedTicket,
                snap.entity_ref(),
                Some(&snap),
                None,
                None,
            );
        }

        let requests = self.storage.requests.get_by_customer(id)?;
        for request in &requests {
            self.storage.requests.delete(request.id)?;
            let snap = Snapshot::from(request);
            recorder.record_best_effort(
                self.session,
                AuditAction::DeletedRequest,
                snap.entity_ref(),
                Some(&snap),
                None,
                None,
            );
        }

        self.storage.customers.delete(id)?;
        self.storage.save_all()?;

        let snap = Snapshot::from(&customer);
        let mut metadata = serde_json::Map::new();
        metadata.insert("tickets_removed".into(), tickets.len().into());
        metadata.insert("requests_removed".into(), requests.len().into());
        recorder.record_best_effort(
            self.session,
            AuditAction::DeletedCustomer,
            snap.entity_ref(),
            Some(&snap),
            None,
            Some(metadata),
        );

        Ok(AccountDeletion {
            customer,
            tickets_removed: tickets.len(),
            requests_removed: requests.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditFilter, EntityType};
    use crate::config::paths::AdminPaths;
    use crate::models::{AdminPermissions, AdminRole, AdminUser, GeneratorId, PurchaseRequest, Ticket};
    use tempfile::TempDir;

    fn setup() -> (Storage, Session, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdminPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let root = AdminUser::new("Root", "root@example.com", AdminRole::SuperAdmin);
        let session = Session::sign_in(&root).unwrap();

        (storage, session, temp_dir)
    }

    #[test]
    fn test_create_writes_audit_entry() {
        let (storage, session, _temp) = setup();
        let service = CustomerService::new(&storage, &session);

        let customer = service.create("Amara Diallo", "amara@example.com").unwrap();

        let entries = storage
            .audit_log
            .query(&AuditFilter::for_entity(
                EntityType::Customer,
                customer.id.to_string(),
            ))
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::CreatedCustomer);
        assert!(entries[0].changes.is_empty());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (storage, session, _temp) = setup();
        let service = CustomerService::new(&storage, &session);

        service.create("Amara Diallo", "amara@example.com").unwrap();
        let err = service.create("Other Person", "amara@example.com").unwrap_err();
        assert!(matches!(err, AdminError::Duplicate { .. }));
    }

    #[test]
    fn test_update_audits_field_changes() {
        let (storage, session, _temp) = setup();
        let service = CustomerService::new(&storage, &session);

        let customer = service.create("Amara Diallo", "amara@example.com").unwrap();
        service
            .update(
                customer.id,
                CustomerPatch {
                    phone: Some("+1 555 010 2030".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let entries = storage
            .audit_log
            .query(
                &AuditFilter::for_entity(EntityType::Customer, customer.id.to_string())
                    .with_action(AuditAction::UpdatedCustomer),
            )
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].changes,
            vec!["phone: \"\" → \"+1 555 010 2030\"".to_string()]
        );
    }

    #[test]
    fn test_permission_denied_without_capability() {
        let (storage, _session, _temp) = setup();

        let mut desk = AdminUser::new("Desk", "desk@example.com", AdminRole::Admin);
        desk.permissions = AdminPermissions::read_only();
        let session = Session::sign_in(&desk).unwrap();

        let service = CustomerService::new(&storage, &session);
        assert!(service.list(false).is_ok());
        assert!(matches!(
            service.create("X", "x@example.com"),
            Err(AdminError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn test_delete_account_cascades_and_audits() {
        let (storage, session, _temp) = setup();
        let service = CustomerService::new(&storage, &session);

        let customer = service.create("Amara Diallo", "amara@example.com").unwrap();
        storage
            .tickets
            .upsert(Ticket::new(customer.id, "No output under load"))
            .unwrap();
        storage
            .tickets
            .upsert(Ticket::new(customer.id, "Broken pull cord"))
            .unwrap();
        storage
            .requests
            .upsert(PurchaseRequest::new(customer.id, GeneratorId::new(), 1))
            .unwrap();

        let outcome = service.delete_account(customer.id).unwrap();
        assert_eq!(outcome.tickets_removed, 2);
        assert_eq!(outcome.requests_removed, 1);

        assert!(storage.customers.get(customer.id).unwrap().is_none());
        assert!(storage.tickets.get_by_customer(customer.id).unwrap().is_empty());

        // create + 2 ticket deletions + 1 request deletion + customer deletion
        assert_eq!(storage.audit_log.entry_count().unwrap(), 5);

        let deletion = storage
            .audit_log
            .query(
                &AuditFilter::for_entity(EntityType::Customer, customer.id.to_string())
                    .with_action(AuditAction::DeletedCustomer),
            )
            .unwrap();
        assert_eq!(deletion.len(), 1);
        let metadata = deletion[0].metadata.as_ref().unwrap();
        assert_eq!(metadata.get("tickets_removed").and_then(|v| v.as_u64()), Some(2));
    }

    #[test]
    fn test_find_by_email_or_id() {
        let (storage, session, _temp) = setup();
        let service = CustomerService::new(&storage, &session);

        let customer = service.create("Amara Diallo", "amara@example.com").unwrap();

        assert!(service.find("amara@example.com").unwrap().is_some());
        assert!(service
            .find(&customer.id.as_uuid().to_string())
            .unwrap()
            .is_some());
        assert!(service.find("nobody@example.com").unwrap().is_none());
    }
}
