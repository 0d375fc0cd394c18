//! Audit log CLI commands
//!
//! Implements CLI commands for querying the audit log. Reading the log
//! requires the reports.read capability.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;

use crate::audit::{AuditAction, AuditFilter, EntityType};
use crate::config::settings::Settings;
use crate::display::audit::{format_audit_entries, format_audit_entry_details};
use crate::error::{AdminError, AdminResult};
use crate::models::{Module, PermissionAction};
use crate::session::Session;
use crate::storage::Storage;

/// Audit log subcommands
#[derive(Subcommand)]
pub enum AuditCommands {
    /// List audit entries, newest first
    List {
        /// Filter by actor email
        #[arg(long)]
        actor: Option<String>,
        /// Filter by action tag (e.g. updated-ticket-status)
        #[arg(long)]
        action: Option<String>,
        /// Filter by entity type (customer, ticket, generator, purchase-request, admin)
        #[arg(long)]
        entity_type: Option<String>,
        /// Filter by entity ID (display form, e.g. tkt-1a2b3c4d)
        #[arg(long)]
        entity_id: Option<String>,
        /// Entries at or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
        /// Entries at or before this date (YYYY-MM-DD, end of day)
        #[arg(long)]
        until: Option<String>,
        /// Maximum number of entries
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one audit entry in full
    Show {
        /// Audit entry ID (display form, e.g. aud-1a2b3c4d)
        entry: String,
    },
    /// List the recognized action tags
    Actions,
}

fn parse_date(s: &str) -> AdminResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AdminError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", s)))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now)
}

// The last representable instant of the day; entries carry sub-second
// timestamps, so 23:59:59 alone would miss the final second's tail.
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now)
}

#[allow(clippy::too_many_arguments)]
fn build_filter(
    storage: &Storage,
    actor: Option<String>,
    action: Option<String>,
    entity_type: Option<String>,
    entity_id: Option<String>,
    since: Option<String>,
    until: Option<String>,
    limit: Option<usize>,
    default_limit: usize,
) -> AdminResult<AuditFilter> {
    let mut filter = AuditFilter::all();

    if let Some(email) = actor {
        let admin = storage
            .admins
            .get_by_email(&email)?
            .ok_or_else(|| AdminError::admin_not_found(&email))?;
        filter.actor_id = Some(admin.id);
    }

    if let Some(tag) = action {
        filter.action = Some(AuditAction::parse(&tag).ok_or_else(|| {
            AdminError::Validation(format!(
                "Unknown action tag: '{}'. Run 'genadmin audit actions' for the full list",
                tag
            ))
        })?);
    }

    if let Some(tag) = entity_type {
        filter.entity_type = Some(EntityType::parse(&tag).ok_or_else(|| {
            AdminError::Validation(format!(
                "Invalid entity type: '{}'. Valid types: customer, ticket, generator, purchase-request, admin",
                tag
            ))
        })?);
    }

    filter.entity_id = entity_id;

    if let Some(date) = since {
        filter.since = Some(start_of_day(parse_date(&date)?));
    }
    if let Some(date) = until {
        filter.until = Some(end_of_day(parse_date(&date)?));
    }

    filter.limit = limit.unwrap_or(default_limit);

    Ok(filter)
}

/// Handle an audit log command
pub fn handle_audit_command(
    storage: &Storage,
    session: &Session,
    settings: &Settings,
    cmd: AuditCommands,
) -> AdminResult<()> {
    session.require(Module::Reports, PermissionAction::Read)?;

    match cmd {
        AuditCommands::List {
            actor,
            action,
            entity_type,
            entity_id,
            since,
            until,
            limit,
        } => {
            let filter = build_filter(
                storage,
                actor,
                action,
                entity_type,
                entity_id,
                since,
                until,
                limit,
                settings.audit_query_limit,
            )?;
            let entries = storage.audit_log.query(&filter)?;
            print!("{}", format_audit_entries(&entries));
        }

        AuditCommands::Show { entry } => {
            let entries = storage.audit_log.read_all()?;
            let found = entries
                .iter()
                .find(|e| e.id.to_string() == entry)
                .ok_or_else(|| AdminError::NotFound {
                    entity_type: "AuditEntry",
                    identifier: entry.clone(),
                })?;
            print!("{}", format_audit_entry_details(found));
        }

        AuditCommands::Actions => {
            for action in AuditAction::ALL {
                println!("{}", action.as_str());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AdminPaths;
    use chrono::Timelike;
    use tempfile::TempDir;

    fn test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdminPaths::with_base_dir(temp_dir.path().to_path_buf());
        (Storage::new(paths).unwrap(), temp_dir)
    }

    #[test]
    fn test_configured_limit_is_the_default() {
        let (storage, _temp) = test_storage();

        let filter =
            build_filter(&storage, None, None, None, None, None, None, None, 10).unwrap();
        assert_eq!(filter.limit, 10);
    }

    #[test]
    fn test_limit_flag_overrides_configured_default() {
        let (storage, _temp) = test_storage();

        let filter =
            build_filter(&storage, None, None, None, None, None, None, Some(3), 10).unwrap();
        assert_eq!(filter.limit, 3);
    }

    #[test]
    fn test_until_covers_the_whole_day() {
        let date = parse_date("2026-03-14").unwrap();
        let bound = end_of_day(date);

        // An entry stamped in the last second's sub-second tail still matches
        let late = date
            .and_hms_nano_opt(23, 59, 59, 500_000_000)
            .unwrap()
            .and_utc();
        assert!(late <= bound);
        assert_eq!(bound.nanosecond(), 999_999_999);

        // Midnight of the next day does not
        let next = date.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap().and_utc();
        assert!(next > bound);
    }
}
