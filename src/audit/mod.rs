//! Audit logging system for genadmin
//!
//! Records every create, update, and delete operation with before/after
//! snapshots in an append-only audit log.
//!
//! # Architecture
//!
//! - `derive_changes`: pure derivation of human-readable, field-level change
//!   descriptions from two optional snapshots.
//! - `AuditEntry` / `AuditAction` / `Actor` / `EntityRef`: the immutable
//!   record shape.
//! - `Snapshot`: tagged per-entity snapshot exposing the common field-map
//!   shape the differ consumes.
//! - `AuditFilter`: AND-composed query filter with a hard result cap.
//! - `AuditRecorder`: assembles entries and appends them to the
//!   [`AuditLogStore`](crate::storage::AuditLogStore); the best-effort
//!   variant never lets an audit failure block a business operation.
//!
//! # Example
//!
//! ```rust,ignore
//! use genadmin::audit::{AuditAction, AuditRecorder, Snapshot};
//!
//! let recorder = AuditRecorder::new(&storage.audit_log);
//! let before = Snapshot::from(&old_ticket);
//! let after = Snapshot::from(&new_ticket);
//! recorder.record_best_effort(
//!     &session,
//!     AuditAction::UpdatedTicketStatus,
//!     after.entity_ref(),
//!     Some(&before),
//!     Some(&after),
//!     None,
//! );
//! ```

mod diff;
mod entry;
mod query;
mod recorder;
mod snapshot;

pub use diff::{derive_changes, format_value, RESERVED_FIELDS};
pub use entry::{Actor, AuditAction, AuditEntry, EntityRef, EntityType};
pub use query::{AuditFilter, DEFAULT_QUERY_LIMIT};
pub use recorder::AuditRecorder;
pub use snapshot::Snapshot;
