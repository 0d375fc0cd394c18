//! Business logic services for genadmin
//!
//! Services sit between the CLI and storage. Every mutation checks the
//! session's capability first, validates, persists, then records an audit
//! entry on a best-effort basis.

pub mod admin;
pub mod customer;
pub mod generator;
pub mod request;
pub mod ticket;

pub use admin::{AdminPatch, AdminService};
pub use customer::{AccountDeletion, CustomerPatch, CustomerService};
pub use generator::{GeneratorPatch, GeneratorService};
pub use request::RequestService;
pub use ticket::{TicketPatch, TicketService};
