//! Ticket repository for JSON storage
//!
//! Manages loading and saving support tickets to tickets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::AdminError;
use crate::models::{CustomerId, Ticket, TicketId, TicketStatus};

use super::file_io::{read_json, write_json_atomic};

/// Serializable ticket data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TicketData {
    tickets: Vec<Ticket>,
}

/// Repository for ticket persistence
pub struct TicketRepository {
    path: PathBuf,
    data: RwLock<HashMap<TicketId, Ticket>>,
}

impl TicketRepository {
    /// Create a new ticket repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load tickets from disk
    pub fn load(&self) -> Result<(), AdminError> {
        let file_data: TicketData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for ticket in file_data.tickets {
            data.insert(ticket.id, ticket);
        }

        Ok(())
    }

    /// Save tickets to disk
    pub fn save(&self) -> Result<(), AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = TicketData {
            tickets: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a ticket by ID
    pub fn get(&self, id: TicketId) -> Result<Option<Ticket>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all tickets, newest first
    pub fn get_all(&self) -> Result<Vec<Ticket>, AdminError> {
        let data = self
            .data
            .read()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut tickets: Vec<_> = data.values().cloned().collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }

    /// Get all tickets for a customer, newest first
    pub fn get_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Ticket>, AdminError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.customer_id == customer_id)
            .collect())
    }

    /// Get all tickets in a given status, newest first
    pub fn get_by_status(&self, status: TicketStatus) -> Result<Vec<Ticket>, AdminError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|t| t.status == status).collect())
    }

    /// Insert or update a ticket
    pub fn upsert(&self, ticket: Ticket) -> Result<(), AdminError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(ticket.id, ticket);
        Ok(())
    }

    /// Delete a ticket
    pub fn delete(&self, id: TicketId) -> Result<bool, AdminError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| AdminError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }
}
