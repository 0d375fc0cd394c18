//! Support ticket model
//!
//! Represents customer support tickets with status, priority, and an
//! optional assigned admin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AdminId, CustomerId, TicketId};

/// Lifecycle status of a support ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Parse ticket status from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "in-progress" | "in_progress" | "inprogress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Whether the ticket still needs attention
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Resolved => write!(f, "Resolved"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

/// Priority of a support ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    /// Parse priority from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

impl Default for TicketPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Urgent => write!(f, "Urgent"),
        }
    }
}

/// A customer support ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier
    pub id: TicketId,

    /// Customer who opened the ticket
    pub customer_id: CustomerId,

    /// Short summary line
    pub subject: String,

    /// Full problem description
    #[serde(default)]
    pub body: String,

    /// Current status
    pub status: TicketStatus,

    /// Priority
    pub priority: TicketPriority,

    /// Admin currently assigned, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<AdminId>,

    /// When the ticket was opened
    pub created_at: DateTime<Utc>,

    /// When the ticket was last modified
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Open a new ticket for a customer
    pub fn new(customer_id: CustomerId, subject: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: TicketId::new(),
            customer_id,
            subject: subject.into(),
            body: String::new(),
            status: TicketStatus::Open,
            priority: TicketPriority::Medium,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the record as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the ticket
    pub fn validate(&self) -> Result<(), TicketValidationError> {
        if self.subject.trim().is_empty() {
            return Err(TicketValidationError::EmptySubject);
        }

        if self.subject.len() > 200 {
            return Err(TicketValidationError::SubjectTooLong(self.subject.len()));
        }

        Ok(())
    }
}

/// Validation errors for tickets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketValidationError {
    EmptySubject,
    SubjectTooLong(usize),
}

impl fmt::Display for TicketValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySubject => write!(f, "Ticket subject cannot be empty"),
            Self::SubjectTooLong(len) => {
                write!(f, "Ticket subject too long ({} chars, max 200)", len)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ticket_defaults() {
        let ticket = Ticket::new(CustomerId::new(), "No output under load");
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, TicketPriority::Medium);
        assert!(ticket.assigned_to.is_none());
        assert!(ticket.validate().is_ok());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TicketStatus::parse("in-progress"), Some(TicketStatus::InProgress));
        assert_eq!(TicketStatus::parse("CLOSED"), Some(TicketStatus::Closed));
        assert_eq!(TicketStatus::parse("stalled"), None);
    }

    #[test]
    fn test_is_open() {
        assert!(TicketStatus::Open.is_open());
        assert!(TicketStatus::InProgress.is_open());
        assert!(!TicketStatus::Resolved.is_open());
        assert!(!TicketStatus::Closed.is_open());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(TicketPriority::Urgent > TicketPriority::High);
        assert!(TicketPriority::High > TicketPriority::Medium);
        assert!(TicketPriority::Medium > TicketPriority::Low);
    }

    #[test]
    fn test_empty_subject_rejected() {
        let ticket = Ticket::new(CustomerId::new(), "   ");
        assert_eq!(ticket.validate(), Err(TicketValidationError::EmptySubject));
    }
}
