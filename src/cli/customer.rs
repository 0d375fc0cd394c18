//! Customer CLI commands
//!
//! Implements CLI commands for customer account management.

use clap::Subcommand;

use crate::display::customer::{format_customer_details, format_customer_list};
use crate::error::{AdminError, AdminResult};
use crate::models::Customer;
use crate::services::{CustomerPatch, CustomerService};
use crate::session::Session;
use crate::storage::Storage;

/// Customer subcommands
#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Create a new customer account
    Create {
        /// Customer name
        name: String,
        /// Contact email
        email: String,
        /// Contact phone number
        #[arg(short, long)]
        phone: Option<String>,
        /// Company name
        #[arg(short, long)]
        company: Option<String>,
        /// Postal address
        #[arg(short, long)]
        address: Option<String>,
    },
    /// List customer accounts
    List {
        /// Include deactivated customers
        #[arg(short, long)]
        all: bool,
    },
    /// Show customer details
    Show {
        /// Customer email or ID
        customer: String,
    },
    /// Edit a customer account
    Edit {
        /// Customer email or ID
        customer: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New email
        #[arg(long)]
        email: Option<String>,
        /// New phone number
        #[arg(long)]
        phone: Option<String>,
        /// New company name
        #[arg(long)]
        company: Option<String>,
        /// New postal address
        #[arg(long)]
        address: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Deactivate a customer account
    Deactivate {
        /// Customer email or ID
        customer: String,
    },
    /// Delete a customer account and all their tickets and requests
    Delete {
        /// Customer email or ID
        customer: String,
    },
}

fn resolve_customer(service: &CustomerService, identifier: &str) -> AdminResult<Customer> {
    if let Some(customer) = service.find(identifier)? {
        return Ok(customer);
    }

    // Display-form IDs (cus-1a2b3c4d) are not full UUIDs, so match by string
    for customer in service.list(true)? {
        if customer.id.to_string() == identifier {
            return Ok(customer);
        }
    }

    Err(AdminError::customer_not_found(identifier))
}

/// Handle a customer command
pub fn handle_customer_command(
    storage: &Storage,
    session: &Session,
    cmd: CustomerCommands,
) -> AdminResult<()> {
    let service = CustomerService::new(storage, session);

    match cmd {
        CustomerCommands::Create {
            name,
            email,
            phone,
            company,
            address,
        } => {
            let customer = service.create(&name, &email)?;

            let extras = CustomerPatch {
                phone,
                company,
                address,
                ..Default::default()
            };
            let customer = if extras.is_empty() {
                customer
            } else {
                service.update(customer.id, extras)?
            };

            println!("Created customer: {}", customer.name);
            println!("  Email: {}", customer.email);
            println!("  ID:    {}", customer.id);
        }

        CustomerCommands::List { all } => {
            let customers = service.list(all)?;
            print!("{}", format_customer_list(&customers));
        }

        CustomerCommands::Show { customer } => {
            let found = resolve_customer(&service, &customer)?;
            print!("{}", format_customer_details(&found));
        }

        CustomerCommands::Edit {
            customer,
            name,
            email,
            phone,
            company,
            address,
            notes,
        } => {
            let found = resolve_customer(&service, &customer)?;

            let patch = CustomerPatch {
                name,
                email,
                phone,
                company,
                address,
                notes,
            };
            if patch.is_empty() {
                println!("No changes specified. Use --name, --email, --phone, --company, --address, or --notes.");
                return Ok(());
            }

            let updated = service.update(found.id, patch)?;
            println!("Updated customer: {}", updated.name);
        }

        CustomerCommands::Deactivate { customer } => {
            let found = resolve_customer(&service, &customer)?;
            let deactivated = service.deactivate(found.id)?;
            println!("Deactivated customer: {}", deactivated.name);
        }

        CustomerCommands::Delete { customer } => {
            let found = resolve_customer(&service, &customer)?;
            let deletion = service.delete_account(found.id)?;
            println!("Deleted customer: {}", deletion.customer.name);
            println!("  Tickets removed:  {}", deletion.tickets_removed);
            println!("  Requests removed: {}", deletion.requests_removed);
        }
    }

    Ok(())
}
