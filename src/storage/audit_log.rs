//! Append-only audit log store
//!
//! Entries are persisted as line-delimited JSON (JSONL): one complete JSON
//! object per line, appended and flushed immediately. The store exposes no
//! update or delete operation; entries are immutable once written.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::audit::{AuditEntry, AuditFilter};
use crate::error::{AdminError, AdminResult};

/// Append-only JSONL store for audit entries
pub struct AuditLogStore {
    /// Path to the audit log file
    log_path: PathBuf,
}

impl AuditLogStore {
    /// Create a new store backed by the given file
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    ///
    /// Writes the entry as a JSON line and flushes immediately.
    pub fn append(&self, entry: &AuditEntry) -> AdminResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| AdminError::Audit(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| AdminError::Audit(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| AdminError::Audit(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| AdminError::Audit(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read every entry in the log
    ///
    /// Returns entries in write order (oldest first).
    pub fn read_all(&self) -> AdminResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| AdminError::Audit(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                AdminError::Audit(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                AdminError::Audit(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Query entries matching a filter
    ///
    /// Results are ordered by creation time, newest first, truncated to the
    /// filter's limit.
    pub fn query(&self, filter: &AuditFilter) -> AdminResult<Vec<AuditEntry>> {
        let mut matched: Vec<AuditEntry> = self
            .read_all()?
            .into_iter()
            .filter(|entry| filter.matches(entry))
            .collect();

        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched.truncate(filter.limit);

        Ok(matched)
    }

    /// Number of entries in the log
    pub fn entry_count(&self) -> AdminResult<usize> {
        if !self.log_path.exists() {
            return Ok(0);
        }

        let file = File::open(&self.log_path)
            .map_err(|e| AdminError::Audit(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let count = reader
            .lines()
            .filter(|l| l.as_ref().map(|s| !s.trim().is_empty()).unwrap_or(false))
            .count();

        Ok(count)
    }

    /// Check if the audit log file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Get the path to the audit log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
