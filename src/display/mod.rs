//! Display formatting for terminal output
//!
//! Hand-formatted tables and detail views. All functions return strings so
//! they can be tested without capturing stdout.

pub mod admin;
pub mod audit;
pub mod customer;
pub mod generator;
pub mod request;
pub mod ticket;
