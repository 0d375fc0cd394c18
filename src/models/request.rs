//! Purchase request model
//!
//! Represents a customer's request to purchase units of a generator model,
//! with an approval workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CustomerId, GeneratorId, RequestId};

/// Workflow status of a purchase request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Fulfilled,
    Cancelled,
}

impl RequestStatus {
    /// Parse request status from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "fulfilled" => Some(Self::Fulfilled),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether this status is terminal (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Fulfilled | Self::Cancelled)
    }

    /// Whether a transition from `self` to `next` is legal
    ///
    /// Pending requests may be approved, rejected, or cancelled. Approved
    /// requests may be fulfilled or cancelled. Terminal states are frozen.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        match self {
            Self::Pending => matches!(
                next,
                Self::Approved | Self::Rejected | Self::Cancelled
            ),
            Self::Approved => matches!(next, Self::Fulfilled | Self::Cancelled),
            Self::Rejected | Self::Fulfilled | Self::Cancelled => false,
        }
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
            Self::Rejected => write!(f, "Rejected"),
            Self::Fulfilled => write!(f, "Fulfilled"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A purchase request from a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Unique identifier
    pub id: RequestId,

    /// Requesting customer
    pub customer_id: CustomerId,

    /// Requested generator model
    pub generator_id: GeneratorId,

    /// Number of units requested
    pub quantity: u32,

    /// Workflow status
    pub status: RequestStatus,

    /// Free-form notes (rejection reasons, delivery details)
    #[serde(default)]
    pub notes: String,

    /// When the request was submitted
    pub created_at: DateTime<Utc>,

    /// When the request was last modified
    pub updated_at: DateTime<Utc>,
}

impl PurchaseRequest {
    /// Create a new pending request
    pub fn new(customer_id: CustomerId, generator_id: GeneratorId, quantity: u32) -> Self {
        let now = Utc::now();
        Self {
            id: RequestId::new(),
            customer_id,
            generator_id,
            quantity,
            status: RequestStatus::Pending,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the record as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the request
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if self.quantity == 0 {
            return Err(RequestValidationError::ZeroQuantity);
        }

        Ok(())
    }
}

/// Validation errors for purchase requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestValidationError {
    ZeroQuantity,
}

impl fmt::Display for RequestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroQuantity => write!(f, "Quantity must be at least 1"),
        }
    }
}
