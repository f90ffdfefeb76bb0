//! Motorpool CLI - Command-line interface for the company vehicle registry

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "motorpool")]
#[command(version)]
#[command(about = "Company vehicle registry - register, search, and manage vehicle records")]
#[command(long_about = r#"
Motorpool keeps a local registry of company vehicles: who drives them,
which department they belong to, how to reach the owner, and the plate
number that uniquely identifies each car.

Example usage:
  motorpool init
  motorpool add --owner Kim --department Sales --phone 010-0000-0000 --plate "12가3456" --model Sonata
  motorpool search sonata
  motorpool show "12가3456"
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides motorpool.toml)
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new vehicle
    Add {
        /// Owner name
        #[arg(long)]
        owner: String,

        /// Department the owner belongs to
        #[arg(long)]
        department: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Plate number (must be unique)
        #[arg(long)]
        plate: String,

        /// Vehicle model
        #[arg(long)]
        model: String,

        /// Photo reference (URI or path, stored as-is)
        #[arg(long)]
        photo: Option<String>,
    },

    /// List every registered vehicle
    List,

    /// Filter vehicles by owner, plate, or model substring
    Search {
        /// Search query; omit to list everything
        query: Option<String>,
    },

    /// Look up a vehicle by its plate number
    Show {
        /// Plate number
        plate: String,
    },

    /// Modify a registered vehicle; unspecified fields keep their value
    Update {
        /// Vehicle id
        id: i64,

        /// New owner name
        #[arg(long)]
        owner: Option<String>,

        /// New department
        #[arg(long)]
        department: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,

        /// New plate number (must stay unique)
        #[arg(long)]
        plate: Option<String>,

        /// New model
        #[arg(long)]
        model: Option<String>,

        /// New photo reference
        #[arg(long, conflicts_with = "clear_photo")]
        photo: Option<String>,

        /// Remove the photo reference
        #[arg(long)]
        clear_photo: bool,
    },

    /// Remove a vehicle from the registry
    Delete {
        /// Vehicle id
        id: i64,
    },

    /// Show registry statistics
    Stats,

    /// Write motorpool.toml and create the database
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,

        /// Delete any existing database before creating a fresh one
        #[arg(long)]
        reset_db: bool,
    },
}

/// How command results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// Print a JSON result envelope for a completed command
pub fn emit_success(
    _output_mode: OutputMode,
    command: &str,
    data: serde_json::Value,
) -> anyhow::Result<()> {
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        // `init` records the --database value instead of resolving it
        Commands::Init { force, reset_db } => {
            commands::run_init(cli.database, force, reset_db, output_mode)
        }
        command => {
            let database = commands::resolve_database(cli.database)?;
            match command {
                Commands::Add {
                    owner,
                    department,
                    phone,
                    plate,
                    model,
                    photo,
                } => commands::run_add(
                    &database,
                    owner,
                    department,
                    phone,
                    plate,
                    model,
                    photo,
                    output_mode,
                ),
                Commands::List => commands::run_list(&database, output_mode),
                Commands::Search { query } => commands::run_search(&database, query, output_mode),
                Commands::Show { plate } => commands::run_show(&database, plate, output_mode),
                Commands::Update {
                    id,
                    owner,
                    department,
                    phone,
                    plate,
                    model,
                    photo,
                    clear_photo,
                } => commands::run_update(
                    &database,
                    id,
                    owner,
                    department,
                    phone,
                    plate,
                    model,
                    photo,
                    clear_photo,
                    output_mode,
                ),
                Commands::Delete { id } => commands::run_delete(&database, id, output_mode),
                Commands::Stats => commands::run_stats(&database, output_mode),
                Commands::Init { .. } => unreachable!("handled above"),
            }
        }
    }
}
