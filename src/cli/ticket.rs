//! Ticket CLI commands
//!
//! Implements CLI commands for the support desk.

use clap::Subcommand;

use crate::display::ticket::{format_ticket_details, format_ticket_list};
use crate::error::{AdminError, AdminResult};
use crate::models::{AdminUser, Ticket, TicketPriority, TicketStatus};
use crate::services::{CustomerService, TicketPatch, TicketService};
use crate::session::Session;
use crate::storage::Storage;

/// Ticket subcommands
#[derive(Subcommand)]
pub enum TicketCommands {
    /// Open a new ticket for a customer
    Open {
        /// Customer email or ID
        customer: String,
        /// Short summary line
        subject: String,
        /// Full problem description
        #[arg(short, long, default_value = "")]
        body: String,
        /// Priority (low, medium, high, urgent)
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },
    /// List tickets
    List {
        /// Filter by status (open, in-progress, resolved, closed)
        #[arg(short, long)]
        status: Option<String>,
        /// Filter by customer email or ID
        #[arg(short, long)]
        customer: Option<String>,
    },
    /// Show ticket details
    Show {
        /// Ticket ID
        ticket: String,
    },
    /// Edit a ticket
    Edit {
        /// Ticket ID
        ticket: String,
        /// New subject
        #[arg(long)]
        subject: Option<String>,
        /// New body
        #[arg(long)]
        body: Option<String>,
        /// New priority
        #[arg(long)]
        priority: Option<String>,
    },
    /// Move a ticket to a new status
    Status {
        /// Ticket ID
        ticket: String,
        /// New status (open, in-progress, resolved, closed)
        status: String,
    },
    /// Assign a ticket to an admin
    Assign {
        /// Ticket ID
        ticket: String,
        /// Admin email (omit with --clear to unassign)
        #[arg(short, long)]
        admin: Option<String>,
        /// Clear the current assignment
        #[arg(long, conflicts_with = "admin")]
        clear: bool,
    },
    /// Delete a ticket
    Delete {
        /// Ticket ID
        ticket: String,
    },
}

fn parse_status(s: &str) -> AdminResult<TicketStatus> {
    TicketStatus::parse(s).ok_or_else(|| {
        AdminError::Validation(format!(
            "Invalid ticket status: '{}'. Valid statuses: open, in-progress, resolved, closed",
            s
        ))
    })
}

fn parse_priority(s: &str) -> AdminResult<TicketPriority> {
    TicketPriority::parse(s).ok_or_else(|| {
        AdminError::Validation(format!(
            "Invalid priority: '{}'. Valid priorities: low, medium, high, urgent",
            s
        ))
    })
}

fn resolve_ticket(service: &TicketService, identifier: &str) -> AdminResult<Ticket> {
    if let Ok(id) = identifier.parse() {
        if let Some(ticket) = service.get(id)? {
            return Ok(ticket);
        }
    }

    for ticket in service.list()? {
        if ticket.id.to_string() == identifier {
            return Ok(ticket);
        }
    }

    Err(AdminError::ticket_not_found(identifier))
}

fn resolve_admin(storage: &Storage, email: &str) -> AdminResult<AdminUser> {
    storage
        .admins
        .get_by_email(email)?
        .ok_or_else(|| AdminError::admin_not_found(email))
}

/// Handle a ticket command
pub fn handle_ticket_command(
    storage: &Storage,
    session: &Session,
    cmd: TicketCommands,
) -> AdminResult<()> {
    let service = TicketService::new(storage, session);

    match cmd {
        TicketCommands::Open {
            customer,
            subject,
            body,
            priority,
        } => {
            let customers = CustomerService::new(storage, session);
            let found = customers
                .find(&customer)?
                .ok_or_else(|| AdminError::customer_not_found(&customer))?;

            let priority = parse_priority(&priority)?;
            let ticket = service.open(found.id, &subject, &body, priority)?;

            println!("Opened ticket: {}", ticket.subject);
            println!("  Customer: {}", found.name);
            println!("  Priority: {}", ticket.priority);
            println!("  ID:       {}", ticket.id);
        }

        TicketCommands::List { status, customer } => {
            let tickets = if let Some(status) = status {
                service.list_by_status(parse_status(&status)?)?
            } else if let Some(customer) = customer {
                let customers = CustomerService::new(storage, session);
                let found = customers
                    .find(&customer)?
                    .ok_or_else(|| AdminError::customer_not_found(&customer))?;
                service.list_for_customer(found.id)?
            } else {
                service.list()?
            };

            print!("{}", format_ticket_list(&tickets));
        }

        TicketCommands::Show { ticket } => {
            let found = resolve_ticket(&service, &ticket)?;
            print!("{}", format_ticket_details(&found));
        }

        TicketCommands::Edit {
            ticket,
            subject,
            body,
            priority,
        } => {
            let found = resolve_ticket(&service, &ticket)?;

            let priority = priority.as_deref().map(parse_priority).transpose()?;
            let patch = TicketPatch {
                subject,
                body,
                priority,
            };
            if patch.is_empty() {
                println!("No changes specified. Use --subject, --body, or --priority.");
                return Ok(());
            }

            let updated = service.update(found.id, patch)?;
            println!("Updated ticket: {}", updated.subject);
        }

        TicketCommands::Status { ticket, status } => {
            let found = resolve_ticket(&service, &ticket)?;
            let status = parse_status(&status)?;

            let updated = service.set_status(found.id, status)?;
            println!("Ticket {} is now {}", updated.id, updated.status);
        }

        TicketCommands::Assign {
            ticket,
            admin,
            clear,
        } => {
            let found = resolve_ticket(&service, &ticket)?;

            match (admin, clear) {
                (Some(email), _) => {
                    let admin = resolve_admin(storage, &email)?;
                    service.assign(found.id, Some(admin.id))?;
                    println!("Assigned ticket {} to {}", found.id, admin.name);
                }
                (None, true) => {
                    service.assign(found.id, None)?;
                    println!("Cleared assignment on ticket {}", found.id);
                }
                (None, false) => {
                    println!("Specify --admin <email> or --clear.");
                }
            }
        }

        TicketCommands::Delete { ticket } => {
            let found = resolve_ticket(&service, &ticket)?;
            service.delete(found.id)?;
            println!("Deleted ticket: {}", found.subject);
        }
    }

    Ok(())
}
