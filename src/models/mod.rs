//! Core data models for genadmin
//!
//! This module contains all the data structures that represent the
//! back-office domain: customers, the generator catalog, support tickets,
//! purchase requests, and admin users.

pub mod admin;
pub mod customer;
pub mod generator;
pub mod ids;
pub mod request;
pub mod ticket;

pub use admin::{
    AdminPermissions, AdminRole, AdminUser, Module, ModulePermissions, PermissionAction,
};
pub use customer::Customer;
pub use generator::{FuelType, GeneratorModel};
pub use ids::{AdminId, AuditEntryId, CustomerId, GeneratorId, RequestId, TicketId};
pub use request::{PurchaseRequest, RequestStatus};
pub use ticket::{Ticket, TicketPriority, TicketStatus};

use regex::Regex;
use std::sync::OnceLock;

/// Check an email address against a pragmatic shape check (one `@`, a dot in
/// the domain, no whitespace). Not a full RFC 5322 parse.
pub(crate) fn email_is_valid(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    });
    re.is_match(email)
}

/// Check a phone number: digits with optional leading `+`, spaces, dashes,
/// dots, and parentheses; at least 7 digits total.
pub(crate) fn phone_is_valid(phone: &str) -> bool {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    let re = PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9(][0-9 ().-]{5,19}$").expect("phone regex is valid")
    });
    re.is_match(phone) && phone.chars().filter(|c| c.is_ascii_digit()).count() >= 7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(email_is_valid("ops@volta-power.com"));
        assert!(email_is_valid("a.b+tag@sub.example.org"));
        assert!(!email_is_valid("no-at-sign"));
        assert!(!email_is_valid("two@@example.com"));
        assert!(!email_is_valid("spaces in@example.com"));
        assert!(!email_is_valid("nodot@example"));
    }

    #[test]
    fn test_phone_shapes() {
        assert!(phone_is_valid("+1 555 010 2030"));
        assert!(phone_is_valid("555-010-2030"));
        assert!(phone_is_valid("(02) 9374 4000"));
        assert!(!phone_is_valid("call me"));
        assert!(!phone_is_valid("12345"));
    }
}
