//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod admin;
pub mod audit;
pub mod customer;
pub mod generator;
pub mod request;
pub mod ticket;

pub use admin::{handle_admin_command, AdminCommands};
pub use audit::{handle_audit_command, AuditCommands};
pub use customer::{handle_customer_command, CustomerCommands};
pub use generator::{handle_generator_command, GeneratorCommands};
pub use request::{handle_request_command, RequestCommands};
pub use ticket::{handle_ticket_command, TicketCommands};
