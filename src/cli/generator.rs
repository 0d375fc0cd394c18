//! Generator catalog CLI commands
//!
//! Implements CLI commands for the generator model catalog.

use clap::Subcommand;

use crate::display::generator::{format_generator_details, format_generator_list};
use crate::error::{AdminError, AdminResult};
use crate::models::{FuelType, GeneratorModel};
use crate::services::{GeneratorPatch, GeneratorService};
use crate::session::Session;
use crate::storage::Storage;

/// Generator catalog subcommands
#[derive(Subcommand)]
pub enum GeneratorCommands {
    /// Add a generator model to the catalog
    Create {
        /// Model name
        name: String,
        /// Brand name
        brand: String,
        /// Fuel type (diesel, gasoline, natural-gas, propane, solar)
        #[arg(short, long, default_value = "diesel")]
        fuel: String,
        /// Rated power in kilowatts
        #[arg(short, long)]
        power: f64,
        /// Price in cents
        #[arg(long)]
        price: i64,
    },
    /// List catalog entries
    List {
        /// Include archived models
        #[arg(short, long)]
        all: bool,
    },
    /// Show model details
    Show {
        /// Model name or ID
        generator: String,
    },
    /// Edit a catalog entry
    Edit {
        /// Model name or ID
        generator: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New brand
        #[arg(long)]
        brand: Option<String>,
        /// New fuel type
        #[arg(long)]
        fuel: Option<String>,
        /// New rated power in kilowatts
        #[arg(long)]
        power: Option<f64>,
        /// New price in cents
        #[arg(long)]
        price: Option<i64>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Archive a model
    Archive {
        /// Model name or ID
        generator: String,
    },
    /// Unarchive a model
    Unarchive {
        /// Model name or ID
        generator: String,
    },
    /// Adjust stock by a signed delta
    Stock {
        /// Model name or ID
        generator: String,
        /// Units to add (negative to remove)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
}

fn parse_fuel(s: &str) -> AdminResult<FuelType> {
    FuelType::parse(s).ok_or_else(|| {
        AdminError::Validation(format!(
            "Invalid fuel type: '{}'. Valid types: diesel, gasoline, natural-gas, propane, solar",
            s
        ))
    })
}

fn resolve_generator(service: &GeneratorService, identifier: &str) -> AdminResult<GeneratorModel> {
    if let Some(generator) = service.find(identifier)? {
        return Ok(generator);
    }

    for generator in service.list(true)? {
        if generator.id.to_string() == identifier {
            return Ok(generator);
        }
    }

    Err(AdminError::generator_not_found(identifier))
}

/// Handle a generator catalog command
pub fn handle_generator_command(
    storage: &Storage,
    session: &Session,
    cmd: GeneratorCommands,
) -> AdminResult<()> {
    let service = GeneratorService::new(storage, session);

    match cmd {
        GeneratorCommands::Create {
            name,
            brand,
            fuel,
            power,
            price,
        } => {
            let fuel = parse_fuel(&fuel)?;
            let generator = service.create(&name, &brand, fuel, power, price)?;

            println!("Created generator: {}", generator.name);
            println!("  Brand: {}", generator.brand);
            println!("  Fuel:  {}", generator.fuel);
            println!("  ID:    {}", generator.id);
        }

        GeneratorCommands::List { all } => {
            let generators = service.list(all)?;
            print!("{}", format_generator_list(&generators));
        }

        GeneratorCommands::Show { generator } => {
            let found = resolve_generator(&service, &generator)?;
            print!("{}", format_generator_details(&found));
        }

        GeneratorCommands::Edit {
            generator,
            name,
            brand,
            fuel,
            power,
            price,
            description,
        } => {
            let found = resolve_generator(&service, &generator)?;

            let fuel = fuel.as_deref().map(parse_fuel).transpose()?;
            let patch = GeneratorPatch {
                name,
                brand,
                fuel,
                power_kw: power,
                price_cents: price,
                description,
            };

            let updated = service.update(found.id, patch)?;
            println!("Updated generator: {}", updated.name);
        }

        GeneratorCommands::Archive { generator } => {
            let found = resolve_generator(&service, &generator)?;
            let archived = service.archive(found.id)?;
            println!("Archived generator: {}", archived.name);
        }

        GeneratorCommands::Unarchive { generator } => {
            let found = resolve_generator(&service, &generator)?;
            let unarchived = service.unarchive(found.id)?;
            println!("Unarchived generator: {}", unarchived.name);
        }

        GeneratorCommands::Stock { generator, delta } => {
            let found = resolve_generator(&service, &generator)?;
            let updated = service.adjust_stock(found.id, delta)?;
            println!("Adjusted stock for {}: now {}", updated.name, updated.stock);
        }
    }

    Ok(())
}
