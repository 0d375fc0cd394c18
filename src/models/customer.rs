//! Customer model
//!
//! Represents customer accounts: the people and companies that buy and
//! service generators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CustomerId;
use super::{email_is_valid, phone_is_valid};

/// A customer account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,

    /// Full name (e.g., "Amara Diallo")
    pub name: String,

    /// Contact email address
    pub email: String,

    /// Contact phone number
    #[serde(default)]
    pub phone: String,

    /// Company name, if the customer is a business
    #[serde(default)]
    pub company: String,

    /// Postal address
    #[serde(default)]
    pub address: String,

    /// Whether the account is active (deactivated accounts are kept for history)
    pub active: bool,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the customer record was created
    pub created_at: DateTime<Utc>,

    /// When the customer record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Create a new active customer
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CustomerId::new(),
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            company: String::new(),
            address: String::new(),
            active: true,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the record as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the customer record
    pub fn validate(&self) -> Result<(), CustomerValidationError> {
        if self.name.trim().is_empty() {
            return Err(CustomerValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(CustomerValidationError::NameTooLong(self.name.len()));
        }

        if !email_is_valid(&self.email) {
            return Err(CustomerValidationError::InvalidEmail(self.email.clone()));
        }

        if !self.phone.is_empty() && !phone_is_valid(&self.phone) {
            return Err(CustomerValidationError::InvalidPhone(self.phone.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Validation errors for customers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidEmail(String),
    InvalidPhone(String),
}

impl fmt::Display for CustomerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Customer name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Customer name too long ({} chars, max 100)", len)
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number: {}", phone),
        }
    }
}
