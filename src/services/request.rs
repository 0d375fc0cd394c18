//! Purchase request service
//!
//! Business logic for the purchase workflow: submitting requests and
//! moving them through the approval lifecycle. Approval reserves stock
//! on the requested generator model.

use serde_json::{Map, Value};

use crate::audit::{AuditAction, AuditRecorder, Snapshot};
use crate::error::{AdminError, AdminResult};
use crate::models::{
    CustomerId, GeneratorId, Module, PermissionAction, PurchaseRequest, RequestId, RequestStatus,
};
use crate::session::Session;
use crate::storage::Storage;

/// Service for the purchase workflow
pub struct RequestService<'a> {
    storage: &'a Storage,
    session: &'a Session,
}

impl<'a> RequestService<'a> {
    /// Create a new request service
    pub fn new(storage: &'a Storage, session: &'a Session) -> Self {
        Self { storage, session }
    }

    fn recorder(&self) -> AuditRecorder<'_> {
        AuditRecorder::new(&self.storage.audit_log)
    }

    fn get_required(&self, id: RequestId) -> AdminResult<PurchaseRequest> {
        self.storage
            .requests
            .get(id)?
            .ok_or_else(|| AdminError::request_not_found(id.to_string()))
    }

    /// Submit a new pending request
    ///
    /// The customer must exist and be active, and the generator model must
    /// not be archived.
    pub fn create(
        &self,
        customer_id: CustomerId,
        generator_id: GeneratorId,
        quantity: u32,
        notes: &str,
    ) -> AdminResult<PurchaseRequest> {
        self.session
            .require(Module::PurchaseRequests, PermissionAction::Create)?;

        let customer = self
            .storage
            .customers
            .get(customer_id)?
            .ok_or_else(|| AdminError::customer_not_found(customer_id.to_string()))?;
        if !customer.active {
            return Err(AdminError::Validation(format!(
                "Customer {} is deactivated",
                customer.name
            )));
        }

        let generator = self
            .storage
            .generators
            .get(generator_id)?
            .ok_or_else(|| AdminError::generator_not_found(generator_id.to_string()))?;
        if generator.archived {
            return Err(AdminError::Validation(format!(
                "Generator model {} is archived",
                generator.name
            )));
        }

        let mut request = PurchaseRequest::new(customer_id, generator_id, quantity);
        request.notes = notes.to_string();
        request
            .validate()
            .map_err(|e| AdminError::Validation(e.to_string()))?;

        self.storage.requests.upsert(request.clone())?;
        self.storage.requests.save()?;

        let after = Snapshot::from(&request);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::CreatedRequest,
            after.entity_ref(),
            None,
            Some(&after),
            None,
        );

        Ok(request)
    }

    /// Get a request by ID
    pub fn get(&self, id: RequestId) -> AdminResult<Option<PurchaseRequest>> {
        self.session
            .require(Module::PurchaseRequests, PermissionAction::Read)?;
        self.storage.requests.get(id)
    }

    /// List all requests, newest first
    pub fn list(&self) -> AdminResult<Vec<PurchaseRequest>> {
        self.session
            .require(Module::PurchaseRequests, PermissionAction::Read)?;
        self.storage.requests.get_all()
    }

    /// List requests in a given status, newest first
    pub fn list_by_status(&self, status: RequestStatus) -> AdminResult<Vec<PurchaseRequest>> {
        self.session
            .require(Module::PurchaseRequests, PermissionAction::Read)?;
        self.storage.requests.get_by_status(status)
    }

    /// List requests from a customer, newest first
    pub fn list_for_customer(&self, customer_id: CustomerId) -> AdminResult<Vec<PurchaseRequest>> {
        self.session
            .require(Module::PurchaseRequests, PermissionAction::Read)?;
        self.storage.requests.get_by_customer(customer_id)
    }

    /// Move a request to a new workflow status
    ///
    /// Only legal transitions are accepted. Approving a request decrements
    /// stock on the generator model and fails if stock is insufficient.
    pub fn set_status(
        &self,
        id: RequestId,
        status: RequestStatus,
        note: Option<&str>,
    ) -> AdminResult<PurchaseRequest> {
        self.session
            .require(Module::PurchaseRequests, PermissionAction::Update)?;

        let before = self.get_required(id)?;

        if !before.status.can_transition_to(status) {
            return Err(AdminError::InvalidTransition(format!(
                "{} → {}",
                before.status, status
            )));
        }

        if status == RequestStatus::Approved {
            self.reserve_stock(&before)?;
        }

        let mut request = before.clone();
        request.status = status;
        if let Some(note) = note {
            request.notes = note.to_string();
        }
        request.touch();

        self.storage.requests.upsert(request.clone())?;
        self.storage.requests.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&request);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::UpdatedRequestStatus,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(request)
    }

    /// Delete a request permanently
    pub fn delete(&self, id: RequestId) -> AdminResult<()> {
        self.session
            .require(Module::PurchaseRequests, PermissionAction::Delete)?;

        let request = self.get_required(id)?;

        self.storage.requests.delete(id)?;
        self.storage.requests.save()?;

        let before_snap = Snapshot::from(&request);
        let mut metadata = Map::new();
        metadata.insert(
            "customer_id".to_string(),
            Value::String(request.customer_id.to_string()),
        );
        self.recorder().record_best_effort(
            self.session,
            AuditAction::DeletedRequest,
            before_snap.entity_ref(),
            Some(&before_snap),
            None,
            Some(metadata),
        );

        Ok(())
    }

    // Decrement stock on the requested model, with its own audit entry so
    // the inventory change is traceable to the approval.
    fn reserve_stock(&self, request: &PurchaseRequest) -> AdminResult<()> {
        let generator = self
            .storage
            .generators
            .get(request.generator_id)?
            .ok_or_else(|| AdminError::generator_not_found(request.generator_id.to_string()))?;

        if generator.stock < request.quantity {
            return Err(AdminError::Validation(format!(
                "Insufficient stock for {}: have {}, requested {}",
                generator.name, generator.stock, request.quantity
            )));
        }

        let mut updated = generator.clone();
        updated.stock -= request.quantity;
        updated.touch();

        self.storage.generators.upsert(updated.clone())?;
        self.storage.generators.save()?;

        let before_snap = Snapshot::from(&generator);
        let after_snap = Snapshot::from(&updated);
        let mut metadata = Map::new();
        metadata.insert(
            "request_id".to_string(),
            Value::String(request.id.to_string()),
        );
        self.recorder().record_best_effort(
            self.session,
            AuditAction::AdjustedGeneratorStock,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            Some(metadata),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditFilter;
    use crate::config::paths::AdminPaths;
    use crate::models::{AdminRole, AdminUser, Customer, FuelType, GeneratorModel};
    use tempfile::TempDir;

    fn setup() -> (Storage, Session, CustomerId, GeneratorId, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdminPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let customer = Customer::new("Harbor Marine Ltd", "ops@harbormarine.test");
        let customer_id = customer.id;
        storage.customers.upsert(customer).unwrap();

        let mut generator =
            GeneratorModel::new("PowerMax 7500E", "Volta", FuelType::Diesel, 7.5, 129_900);
        generator.stock = 10;
        let generator_id = generator.id;
        storage.generators.upsert(generator).unwrap();

        let root = AdminUser::new("Root", "root@example.com", AdminRole::SuperAdmin);
        let session = Session::sign_in(&root).unwrap();

        (storage, session, customer_id, generator_id, temp_dir)
    }

    #[test]
    fn test_create_rejects_archived_model() {
        let (storage, session, customer_id, generator_id, _temp) = setup();
        let service = RequestService::new(&storage, &session);

        let mut generator = storage.generators.get(generator_id).unwrap().unwrap();
        generator.archived = true;
        storage.generators.upsert(generator).unwrap();

        assert!(matches!(
            service.create(customer_id, generator_id, 2, ""),
            Err(AdminError::Validation(_))
        ));
    }

    #[test]
    fn test_create_rejects_deactivated_customer() {
        let (storage, session, customer_id, generator_id, _temp) = setup();
        let service = RequestService::new(&storage, &session);

        let mut customer = storage.customers.get(customer_id).unwrap().unwrap();
        customer.active = false;
        storage.customers.upsert(customer).unwrap();

        assert!(matches!(
            service.create(customer_id, generator_id, 2, ""),
            Err(AdminError::Validation(_))
        ));
    }

    #[test]
    fn test_approval_decrements_stock_and_audits_both() {
        let (storage, session, customer_id, generator_id, _temp) = setup();
        let service = RequestService::new(&storage, &session);

        let request = service.create(customer_id, generator_id, 3, "").unwrap();
        service
            .set_status(request.id, RequestStatus::Approved, None)
            .unwrap();

        let generator = storage.generators.get(generator_id).unwrap().unwrap();
        assert_eq!(generator.stock, 7);

        let status_entries = storage
            .audit_log
            .query(&AuditFilter::all().with_action(AuditAction::UpdatedRequestStatus))
            .unwrap();
        assert_eq!(status_entries.len(), 1);
        assert_eq!(
            status_entries[0].changes,
            vec!["status: \"pending\" → \"approved\"".to_string()]
        );

        let stock_entries = storage
            .audit_log
            .query(&AuditFilter::all().with_action(AuditAction::AdjustedGeneratorStock))
            .unwrap();
        assert_eq!(stock_entries.len(), 1);
        let metadata = stock_entries[0].metadata.as_ref().unwrap();
        assert_eq!(
            metadata.get("request_id").unwrap().as_str().unwrap(),
            request.id.to_string()
        );
    }

    #[test]
    fn test_approval_fails_on_insufficient_stock() {
        let (storage, session, customer_id, generator_id, _temp) = setup();
        let service = RequestService::new(&storage, &session);

        let request = service.create(customer_id, generator_id, 25, "").unwrap();
        assert!(matches!(
            service.set_status(request.id, RequestStatus::Approved, None),
            Err(AdminError::Validation(_))
        ));

        // Request stays pending and stock is untouched
        let request = storage.requests.get(request.id).unwrap().unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        let generator = storage.generators.get(generator_id).unwrap().unwrap();
        assert_eq!(generator.stock, 10);
    }

    #[test]
    fn test_illegal_transitions_rejected() {
        let (storage, session, customer_id, generator_id, _temp) = setup();
        let service = RequestService::new(&storage, &session);

        let request = service.create(customer_id, generator_id, 1, "").unwrap();

        // Pending cannot jump straight to fulfilled
        assert!(matches!(
            service.set_status(request.id, RequestStatus::Fulfilled, None),
            Err(AdminError::InvalidTransition(_))
        ));

        service
            .set_status(request.id, RequestStatus::Rejected, Some("Out of territory"))
            .unwrap();

        // Terminal states are frozen
        assert!(matches!(
            service.set_status(request.id, RequestStatus::Approved, None),
            Err(AdminError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_fulfil_after_approval() {
        let (storage, session, customer_id, generator_id, _temp) = setup();
        let service = RequestService::new(&storage, &session);

        let request = service.create(customer_id, generator_id, 2, "").unwrap();
        service
            .set_status(request.id, RequestStatus::Approved, None)
            .unwrap();
        let request = service
            .set_status(request.id, RequestStatus::Fulfilled, Some("Shipped 2026-02-10"))
            .unwrap();

        assert_eq!(request.status, RequestStatus::Fulfilled);
        assert_eq!(request.notes, "Shipped 2026-02-10");
    }
}
