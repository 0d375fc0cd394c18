//! Purchase request CLI commands
//!
//! Implements CLI commands for the purchase workflow.

use clap::Subcommand;

use crate::display::request::{format_request_details, format_request_list};
use crate::error::{AdminError, AdminResult};
use crate::models::{PurchaseRequest, RequestStatus};
use crate::services::{CustomerService, GeneratorService, RequestService};
use crate::session::Session;
use crate::storage::Storage;

/// Purchase request subcommands
#[derive(Subcommand)]
pub enum RequestCommands {
    /// Submit a new purchase request
    Create {
        /// Customer email or ID
        customer: String,
        /// Generator model name or ID
        generator: String,
        /// Number of units
        #[arg(short, long, default_value = "1")]
        quantity: u32,
        /// Free-form notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// List purchase requests
    List {
        /// Filter by status (pending, approved, rejected, fulfilled, cancelled)
        #[arg(short, long)]
        status: Option<String>,
        /// Filter by customer email or ID
        #[arg(short, long)]
        customer: Option<String>,
    },
    /// Show request details
    Show {
        /// Request ID
        request: String,
    },
    /// Approve a pending request (reserves stock)
    Approve {
        /// Request ID
        request: String,
    },
    /// Reject a pending request
    Reject {
        /// Request ID
        request: String,
        /// Rejection reason
        #[arg(short, long)]
        reason: Option<String>,
    },
    /// Mark an approved request as fulfilled
    Fulfill {
        /// Request ID
        request: String,
        /// Delivery notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Cancel a pending or approved request
    Cancel {
        /// Request ID
        request: String,
    },
    /// Delete a request
    Delete {
        /// Request ID
        request: String,
    },
}

fn resolve_request(service: &RequestService, identifier: &str) -> AdminResult<PurchaseRequest> {
    if let Ok(id) = identifier.parse() {
        if let Some(request) = service.get(id)? {
            return Ok(request);
        }
    }

    for request in service.list()? {
        if request.id.to_string() == identifier {
            return Ok(request);
        }
    }

    Err(AdminError::request_not_found(identifier))
}

fn parse_request_status(s: &str) -> AdminResult<RequestStatus> {
    RequestStatus::parse(s).ok_or_else(|| {
        AdminError::Validation(format!(
            "Invalid request status: '{}'. Valid statuses: pending, approved, rejected, fulfilled, cancelled",
            s
        ))
    })
}

/// Handle a purchase request command
pub fn handle_request_command(
    storage: &Storage,
    session: &Session,
    cmd: RequestCommands,
) -> AdminResult<()> {
    let service = RequestService::new(storage, session);

    match cmd {
        RequestCommands::Create {
            customer,
            generator,
            quantity,
            notes,
        } => {
            let customers = CustomerService::new(storage, session);
            let found_customer = customers
                .find(&customer)?
                .ok_or_else(|| AdminError::customer_not_found(&customer))?;

            let generators = GeneratorService::new(storage, session);
            let found_generator = generators
                .find(&generator)?
                .ok_or_else(|| AdminError::generator_not_found(&generator))?;

            let request =
                service.create(found_customer.id, found_generator.id, quantity, &notes)?;

            println!("Submitted purchase request: {}", request.id);
            println!("  Customer:  {}", found_customer.name);
            println!("  Generator: {}", found_generator.name);
            println!("  Quantity:  {}", request.quantity);
        }

        RequestCommands::List { status, customer } => {
            let requests = if let Some(status) = status {
                service.list_by_status(parse_request_status(&status)?)?
            } else if let Some(customer) = customer {
                let customers = CustomerService::new(storage, session);
                let found = customers
                    .find(&customer)?
                    .ok_or_else(|| AdminError::customer_not_found(&customer))?;
                service.list_for_customer(found.id)?
            } else {
                service.list()?
            };

            print!("{}", format_request_list(&requests));
        }

        RequestCommands::Show { request } => {
            let found = resolve_request(&service, &request)?;
            print!("{}", format_request_details(&found));
        }

        RequestCommands::Approve { request } => {
            let found = resolve_request(&service, &request)?;
            let updated = service.set_status(found.id, RequestStatus::Approved, None)?;
            println!("Approved request {}", updated.id);
        }

        RequestCommands::Reject { request, reason } => {
            let found = resolve_request(&service, &request)?;
            let updated =
                service.set_status(found.id, RequestStatus::Rejected, reason.as_deref())?;
            println!("Rejected request {}", updated.id);
        }

        RequestCommands::Fulfill { request, notes } => {
            let found = resolve_request(&service, &request)?;
            let updated =
                service.set_status(found.id, RequestStatus::Fulfilled, notes.as_deref())?;
            println!("Fulfilled request {}", updated.id);
        }

        RequestCommands::Cancel { request } => {
            let found = resolve_request(&service, &request)?;
            let updated = service.set_status(found.id, RequestStatus::Cancelled, None)?;
            println!("Cancelled request {}", updated.id);
        }

        RequestCommands::Delete { request } => {
            let found = resolve_request(&service, &request)?;
            service.delete(found.id)?;
            println!("Deleted request {}", found.id);
        }
    }

    Ok(())
}
