//! genadmin - back-office administration for generator sales and support
//!
//! This library provides the core functionality for the genadmin tool: a
//! terminal back-office for a generator dealership, covering customer
//! accounts, the product catalog, support tickets, purchase requests, and
//! admin accounts with per-module permissions. Every mutation is recorded
//! in an append-only audit log with field-level change derivation.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (customers, generators, tickets, requests, admins)
//! - `storage`: JSON file storage layer plus the JSONL audit log
//! - `audit`: Change derivation, audit entries, recording, and queries
//! - `session`: Signed-in admin identity and permission evaluation
//! - `services`: Business logic layer
//! - `cli`: Command handlers
//! - `display`: Terminal output formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use genadmin::config::paths::AdminPaths;
//! use genadmin::storage::Storage;
//!
//! let paths = AdminPaths::new()?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{AdminError, AdminResult};
pub use session::Session;
