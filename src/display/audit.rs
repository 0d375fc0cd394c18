//! Audit log display formatting
//!
//! Formats audit entries for terminal output. The detail view shows the
//! derived change list under each entry.

use crate::audit::AuditEntry;

/// Format a list of audit entries, one block per entry
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries found.".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }

    output
}

/// Format a single audit entry with full metadata
pub fn format_audit_entry_details(entry: &AuditEntry) -> String {
    let mut output = String::new();

    output.push_str(&format!("Audit Entry: {}\n", entry.id));
    output.push_str(&format!("  Action: {}\n", entry.action));
    output.push_str(&format!("  Actor:  {}\n", entry.actor));
    output.push_str(&format!("  Target: {}\n", entry.target));
    output.push_str(&format!(
        "  When:   {}\n",
        entry.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if !entry.changes.is_empty() {
        output.push('\n');
        output.push_str("  Changes:\n");
        for change in &entry.changes {
            output.push_str(&format!("    {}\n", change));
        }
    }

    if let Some(metadata) = &entry.metadata {
        output.push('\n');
        output.push_str("  Metadata:\n");
        for (key, value) in metadata {
            output.push_str(&format!("    {}: {}\n", key, value));
        }
    }

    output
}
