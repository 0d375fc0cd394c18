//! Tagged entity snapshots
//!
//! A [`Snapshot`] captures one entity at a point in time, before or after a
//! mutation. Each variant wraps the full typed record; the differ consumes
//! the common field-map shape exposed by [`Snapshot::fields`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{AdminUser, Customer, GeneratorModel, PurchaseRequest, Ticket};

use super::entry::{EntityRef, EntityType};

/// A point-in-time snapshot of one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "entity", content = "record", rename_all = "kebab-case")]
pub enum Snapshot {
    Customer(Customer),
    Ticket(Ticket),
    Generator(GeneratorModel),
    PurchaseRequest(PurchaseRequest),
    Admin(AdminUser),
}

impl Snapshot {
    /// The entity type tag of this snapshot
    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Customer(_) => EntityType::Customer,
            Self::Ticket(_) => EntityType::Ticket,
            Self::Generator(_) => EntityType::Generator,
            Self::PurchaseRequest(_) => EntityType::PurchaseRequest,
            Self::Admin(_) => EntityType::Admin,
        }
    }

    /// The display-form ID of the wrapped entity
    pub fn entity_id(&self) -> String {
        match self {
            Self::Customer(c) => c.id.to_string(),
            Self::Ticket(t) => t.id.to_string(),
            Self::Generator(g) => g.id.to_string(),
            Self::PurchaseRequest(r) => r.id.to_string(),
            Self::Admin(a) => a.id.to_string(),
        }
    }

    /// A human-readable label for the wrapped entity
    pub fn label(&self) -> String {
        match self {
            Self::Customer(c) => c.name.clone(),
            Self::Ticket(t) => t.subject.clone(),
            Self::Generator(g) => format!("{} {}", g.brand, g.name),
            Self::PurchaseRequest(r) => format!("{} x{}", r.generator_id, r.quantity),
            Self::Admin(a) => a.name.clone(),
        }
    }

    /// A reference to the wrapped entity, for use as an audit target
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.entity_type(), self.entity_id(), Some(self.label()))
    }

    /// The common field-map shape the differ operates on
    ///
    /// Serializes the wrapped record to a mapping from field name to JSON
    /// value. Entity records are plain structs, so this is always an object.
    pub fn fields(&self) -> Map<String, Value> {
        let value = match self {
            Self::Customer(c) => serde_json::to_value(c),
            Self::Ticket(t) => serde_json::to_value(t),
            Self::Generator(g) => serde_json::to_value(g),
            Self::PurchaseRequest(r) => serde_json::to_value(r),
            Self::Admin(a) => serde_json::to_value(a),
        };

        match value {
            Ok(Value::Object(map)) => map,
            other => {
                debug_assert!(false, "entity record did not serialize to an object: {:?}", other);
                Map::new()
            }
        }
    }
}

impl From<&Customer> for Snapshot {
    fn from(customer: &Customer) -> Self {
        Self::Customer(customer.clone())
    }
}

impl From<&Ticket> for Snapshot {
    fn from(ticket: &Ticket) -> Self {
        Self::Ticket(ticket.clone())
    }
}

impl From<&GeneratorModel> for Snapshot {
    fn from(generator: &GeneratorModel) -> Self {
        Self::Generator(generator.clone())
    }
}

impl From<&PurchaseRequest> for Snapshot {
    fn from(request: &PurchaseRequest) -> Self {
        Self::PurchaseRequest(request.clone())
    }
}

impl From<&AdminUser> for Snapshot {
    fn from(admin: &AdminUser) -> Self {
        Self::Admin(admin.clone())
    }
}
