//! Audit recorder
//!
//! Assembles and persists audit entries. The actor is passed explicitly;
//! `record_best_effort` is the swallow-and-log variant services use so that
//! audit failures never block the business operation they accompany.

use serde_json::{Map, Value};

use crate::error::AdminResult;
use crate::session::Session;
use crate::storage::AuditLogStore;

use super::entry::{Actor, AuditAction, AuditEntry, EntityRef};
use super::snapshot::Snapshot;

/// Assembles audit entries and appends them to the log store
pub struct AuditRecorder<'a> {
    store: &'a AuditLogStore,
}

impl<'a> AuditRecorder<'a> {
    /// Create a recorder over the given store
    pub fn new(store: &'a AuditLogStore) -> Self {
        Self { store }
    }

    /// Record one entry
    ///
    /// Derives the change list from the snapshots and appends an immutable
    /// entry stamped at append time. Returns the written entry.
    pub fn record(
        &self,
        actor: &Actor,
        action: AuditAction,
        target: EntityRef,
        before: Option<&Snapshot>,
        after: Option<&Snapshot>,
        metadata: Option<Map<String, Value>>,
    ) -> AdminResult<AuditEntry> {
        let entry = AuditEntry::new(
            actor.clone(),
            action,
            target,
            before.map(Snapshot::fields),
            after.map(Snapshot::fields),
            metadata,
        );

        self.store.append(&entry)?;
        Ok(entry)
    }

    /// Record one entry on behalf of the session's signed-in admin
    ///
    /// Fails closed with `Unauthenticated` when nobody is signed in.
    pub fn record_session(
        &self,
        session: &Session,
        action: AuditAction,
        target: EntityRef,
        before: Option<&Snapshot>,
        after: Option<&Snapshot>,
        metadata: Option<Map<String, Value>>,
    ) -> AdminResult<AuditEntry> {
        let actor = session.current_actor()?;
        self.record(actor, action, target, before, after, metadata)
    }

    /// Record one entry, swallowing any failure
    ///
    /// Missing identity and persistence failures alike go to the diagnostic
    /// log only; the entry is simply not written. Callers that need the
    /// failure use `record` or `record_session` instead.
    pub fn record_best_effort(
        &self,
        session: &Session,
        action: AuditAction,
        target: EntityRef,
        before: Option<&Snapshot>,
        after: Option<&Snapshot>,
        metadata: Option<Map<String, Value>>,
    ) {
        if let Err(e) = self.record_session(session, action, target, before, after, metadata) {
            tracing::warn!(action = %action, error = %e, "audit entry dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{derive_changes, AuditFilter, EntityType};
    use crate::models::{AdminRole, AdminUser, Customer};
    use tempfile::TempDir;

    fn store() -> (AuditLogStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = AuditLogStore::new(temp_dir.path().join("audit.log"));
        (store, temp_dir)
    }

    fn signed_in() -> Session {
        let admin = AdminUser::new("Root", "root@example.com", AdminRole::SuperAdmin);
        Session::sign_in(&admin).unwrap()
    }

    #[test]
    fn test_record_appends_entry() {
        let (store, _temp) = store();
        let recorder = AuditRecorder::new(&store);
        let session = signed_in();

        let customer = Customer::new("Amara Diallo", "amara@example.com");
        let after = Snapshot::from(&customer);

        recorder
            .record_session(
                &session,
                AuditAction::CreatedCustomer,
                after.entity_ref(),
                None,
                Some(&after),
                None,
            )
            .unwrap();

        assert_eq!(store.entry_count().unwrap(), 1);
        let entries = store.read_all().unwrap();
        assert_eq!(entries[0].action, AuditAction::CreatedCustomer);
        assert!(entries[0].before.is_none());
        assert!(entries[0].after.is_some());
        assert!(entries[0].changes.is_empty());
    }

    #[test]
    fn test_anonymous_best_effort_writes_nothing() {
        let (store, _temp) = store();
        let recorder = AuditRecorder::new(&store);
        let session = Session::anonymous();

        let customer = Customer::new("Amara Diallo", "amara@example.com");
        let after = Snapshot::from(&customer);

        // Does not panic, does not propagate, does not write.
        recorder.record_best_effort(
            &session,
            AuditAction::CreatedCustomer,
            after.entity_ref(),
            None,
            Some(&after),
            None,
        );

        assert_eq!(store.entry_count().unwrap(), 0);
    }

    #[test]
    fn test_anonymous_record_session_fails_closed() {
        let (store, _temp) = store();
        let recorder = AuditRecorder::new(&store);

        let customer = Customer::new("Amara Diallo", "amara@example.com");
        let after = Snapshot::from(&customer);

        let result = recorder.record_session(
            &Session::anonymous(),
            AuditAction::CreatedCustomer,
            after.entity_ref(),
            None,
            Some(&after),
            None,
        );

        assert!(result.is_err());
        assert_eq!(store.entry_count().unwrap(), 0);
    }

    #[test]
    fn test_roundtrip_changes_match_derivation() {
        let (store, _temp) = store();
        let recorder = AuditRecorder::new(&store);
        let session = signed_in();

        let mut before_customer = Customer::new("Amara Diallo", "amara@example.com");
        before_customer.phone = "+1 555 010 2030".to_string();
        let mut after_customer = before_customer.clone();
        after_customer.phone = "+1 555 010 9999".to_string();

        let before = Snapshot::from(&before_customer);
        let after = Snapshot::from(&after_customer);

        recorder
            .record_session(
                &session,
                AuditAction::UpdatedCustomer,
                after.entity_ref(),
                Some(&before),
                Some(&after),
                None,
            )
            .unwrap();

        let entries = store
            .query(&AuditFilter::for_entity(
                EntityType::Customer,
                after_customer.id.to_string(),
            ))
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].changes,
            derive_changes(Some(&before.fields()), Some(&after.fields()))
        );
        assert_eq!(
            entries[0].changes,
            vec!["phone: \"+1 555 010 2030\" → \"+1 555 010 9999\"".to_string()]
        );
    }
}
