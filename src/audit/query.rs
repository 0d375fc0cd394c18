//! Audit log query filters
//!
//! Filters combine with logical AND; each criterion is independently
//! optional. Results are capped by `limit` (default 100) with no pagination
//! cursor; callers needing more must narrow their filter.

use chrono::{DateTime, Utc};

use crate::models::AdminId;

use super::entry::{AuditAction, AuditEntry, EntityType};

/// Default result cap for audit queries
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Filter for audit log queries
#[derive(Debug, Clone)]
pub struct AuditFilter {
    /// Match entries recorded by this actor
    pub actor_id: Option<AdminId>,

    /// Match entries with this action tag
    pub action: Option<AuditAction>,

    /// Match entries targeting this entity type
    pub entity_type: Option<EntityType>,

    /// Match entries targeting this entity ID (display form)
    pub entity_id: Option<String>,

    /// Creation-time lower bound (inclusive)
    pub since: Option<DateTime<Utc>>,

    /// Creation-time upper bound (inclusive)
    pub until: Option<DateTime<Utc>>,

    /// Result cap
    pub limit: usize,
}

impl Default for AuditFilter {
    fn default() -> Self {
        Self {
            actor_id: None,
            action: None,
            entity_type: None,
            entity_id: None,
            since: None,
            until: None,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl AuditFilter {
    /// Match everything, up to the default limit
    pub fn all() -> Self {
        Self::default()
    }

    /// Match entries targeting one specific entity
    pub fn for_entity(entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            entity_type: Some(entity_type),
            entity_id: Some(entity_id.into()),
            ..Self::default()
        }
    }

    /// Match entries recorded by one actor
    pub fn for_actor(actor_id: AdminId) -> Self {
        Self {
            actor_id: Some(actor_id),
            ..Self::default()
        }
    }

    /// Restrict to one action tag
    pub fn with_action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Restrict to entries recorded at or after `since`
    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Restrict to entries recorded at or before `until`
    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    /// Override the result cap
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Whether an entry satisfies every set criterion
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        if let Some(actor_id) = self.actor_id {
            if entry.actor.id != actor_id {
                return false;
            }
        }

        if let Some(action) = self.action {
            if entry.action != action {
                return false;
            }
        }

        if let Some(entity_type) = self.entity_type {
            if entry.target.entity_type != entity_type {
                return false;
            }
        }

        if let Some(entity_id) = &self.entity_id {
            if &entry.target.entity_id != entity_id {
                return false;
            }
        }

        if let Some(since) = self.since {
            if entry.created_at < since {
                return false;
            }
        }

        if let Some(until) = self.until {
            if entry.created_at > until {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{Actor, EntityRef};
    use crate::models::AdminRole;
    use chrono::Duration;

    fn entry_for(actor_id: AdminId, action: AuditAction, entity_id: &str) -> AuditEntry {
        AuditEntry::new(
            Actor {
                id: actor_id,
                name: "Desk".to_string(),
                email: "desk@example.com".to_string(),
                role: AdminRole::Admin,
            },
            action,
            EntityRef::new(action.entity_type(), entity_id, None),
            None,
            None,
            None,
        )
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let entry = entry_for(AdminId::new(), AuditAction::CreatedTicket, "tkt-1");
        assert!(AuditFilter::all().matches(&entry));
    }

    #[test]
    fn test_entity_filter_requires_both_fields() {
        let entry = entry_for(AdminId::new(), AuditAction::UpdatedTicketStatus, "tkt-1");

        assert!(AuditFilter::for_entity(EntityType::Ticket, "tkt-1").matches(&entry));
        assert!(!AuditFilter::for_entity(EntityType::Ticket, "tkt-2").matches(&entry));
        assert!(!AuditFilter::for_entity(EntityType::Customer, "tkt-1").matches(&entry));
    }

    #[test]
    fn test_actor_filter() {
        let actor = AdminId::new();
        let entry = entry_for(actor, AuditAction::CreatedCustomer, "cus-1");

        assert!(AuditFilter::for_actor(actor).matches(&entry));
        assert!(!AuditFilter::for_actor(AdminId::new()).matches(&entry));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let actor = AdminId::new();
        let entry = entry_for(actor, AuditAction::CreatedCustomer, "cus-1");

        let filter = AuditFilter::for_actor(actor).with_action(AuditAction::CreatedCustomer);
        assert!(filter.matches(&entry));

        let filter = AuditFilter::for_actor(actor).with_action(AuditAction::DeletedCustomer);
        assert!(!filter.matches(&entry));
    }

    #[test]
    fn test_time_bounds_inclusive() {
        let entry = entry_for(AdminId::new(), AuditAction::CreatedTicket, "tkt-1");
        let at = entry.created_at;

        assert!(AuditFilter::all().with_since(at).matches(&entry));
        assert!(AuditFilter::all().with_until(at).matches(&entry));
        assert!(!AuditFilter::all()
            .with_since(at + Duration::seconds(1))
            .matches(&entry));
        assert!(!AuditFilter::all()
            .with_until(at - Duration::seconds(1))
            .matches(&entry));
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(AuditFilter::all().limit, DEFAULT_QUERY_LIMIT);
        assert_eq!(AuditFilter::all().with_limit(5).limit, 5);
    }
}
