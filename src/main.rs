use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use genadmin::audit::{Actor, AuditAction, AuditRecorder, Snapshot};
use genadmin::cli::{
    handle_admin_command, handle_audit_command, handle_customer_command, handle_generator_command,
    handle_request_command, handle_ticket_command,
};
use genadmin::config::{paths::AdminPaths, settings::Settings};
use genadmin::models::AdminRole;
use genadmin::storage::Storage;
use genadmin::Session;

#[derive(Parser)]
#[command(
    name = "genadmin",
    version,
    about = "Back-office administration for generator sales and support",
    long_about = "genadmin is a terminal back-office for a generator dealership. \
                  It manages customer accounts, the product catalog, support \
                  tickets, purchase requests, and admin accounts, recording \
                  every change in an append-only audit log."
)]
struct Cli {
    /// Act as this admin (sign-in email)
    #[arg(long = "as", global = true, value_name = "EMAIL", env = "GENADMIN_ACTOR")]
    actor: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Customer account commands
    #[command(subcommand)]
    Customer(genadmin::cli::CustomerCommands),

    /// Generator catalog commands
    #[command(subcommand, alias = "gen")]
    Generator(genadmin::cli::GeneratorCommands),

    /// Support ticket commands
    #[command(subcommand)]
    Ticket(genadmin::cli::TicketCommands),

    /// Purchase request commands
    #[command(subcommand, alias = "req")]
    Request(genadmin::cli::RequestCommands),

    /// Admin account commands
    #[command(subcommand)]
    Admin(genadmin::cli::AdminCommands),

    /// Audit log commands
    #[command(subcommand)]
    Audit(genadmin::cli::AuditCommands),

    /// Initialize storage and create the first super-admin
    Init {
        /// Name of the first super-admin
        name: String,
        /// Sign-in email of the first super-admin
        email: String,
    },

    /// Show current configuration and paths
    Config,
}

fn resolve_session(storage: &Storage, actor: Option<&str>) -> Result<Session> {
    match actor {
        Some(email) => {
            let admin = storage
                .admins
                .get_by_email(email)?
                .ok_or_else(|| anyhow::anyhow!("No admin account with email '{}'", email))?;
            Ok(Session::sign_in(&admin)?)
        }
        None => Ok(Session::anonymous()),
    }
}

fn initialize(storage: &Storage, paths: &AdminPaths, name: &str, email: &str) -> Result<()> {
    if !storage.admins.is_empty()? {
        bail!("Already initialized. Use 'genadmin admin create' to add more admins.");
    }

    let root = genadmin::models::AdminUser::new(name, email.to_lowercase(), AdminRole::SuperAdmin);
    root.validate()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    storage.admins.upsert(root.clone())?;
    storage.save_all()?;

    let settings = Settings::default();
    settings.save(paths)?;

    // Bootstrap is self-attributed; there is nobody else to sign the entry
    let recorder = AuditRecorder::new(&storage.audit_log);
    let after = Snapshot::from(&root);
    recorder.record(
        &Actor::from(&root),
        AuditAction::CreatedAdmin,
        after.entity_ref(),
        None,
        Some(&after),
        None,
    )?;

    println!("Initialized genadmin at: {}", paths.data_dir().display());
    println!("Created super-admin: {} <{}>", root.name, root.email);
    println!();
    println!("Run commands as this admin with --as {} (or set GENADMIN_ACTOR).", root.email);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = AdminPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init { name, email }) => {
            initialize(&storage, &paths, &name, &email)?;
        }
        Some(Commands::Customer(cmd)) => {
            let session = resolve_session(&storage, cli.actor.as_deref())?;
            handle_customer_command(&storage, &session, cmd)?;
        }
        Some(Commands::Generator(cmd)) => {
            let session = resolve_session(&storage, cli.actor.as_deref())?;
            handle_generator_command(&storage, &session, cmd)?;
        }
        Some(Commands::Ticket(cmd)) => {
            let session = resolve_session(&storage, cli.actor.as_deref())?;
            handle_ticket_command(&storage, &session, cmd)?;
        }
        Some(Commands::Request(cmd)) => {
            let session = resolve_session(&storage, cli.actor.as_deref())?;
            handle_request_command(&storage, &session, cmd)?;
        }
        Some(Commands::Admin(cmd)) => {
            let session = resolve_session(&storage, cli.actor.as_deref())?;
            handle_admin_command(&storage, &session, cmd)?;
        }
        Some(Commands::Audit(cmd)) => {
            let session = resolve_session(&storage, cli.actor.as_deref())?;
            handle_audit_command(&storage, &session, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("genadmin Configuration");
            println!("======================");
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Audit query limit: {}", settings.audit_query_limit);
        }
        None => {
            println!("genadmin - back-office for generator sales and support");
            println!();
            println!("Run 'genadmin --help' for usage information.");
            println!("Run 'genadmin init <name> <email>' to set up the first admin.");
        }
    }

    Ok(())
}
