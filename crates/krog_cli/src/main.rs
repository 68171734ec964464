//! Krog CLI
//!
//! Command-line tools for the krog content store.
//!
//! # Commands
//!
//! - `seed` - Load a JSON fixture into a store directory
//! - `inspect` - Display per-collection document counts
//! - `dump` - Print a collection as pretty JSON
//! - `version`

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Krog command-line content tools.
#[derive(Parser)]
#[command(name = "krog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the store directory
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a JSON fixture into the store
    Seed {
        /// Fixture file with wine lists, menus, opening hours, and events
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display per-collection document counts
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print a collection as pretty JSON
    Dump {
        /// Collection name (wine_lists, menus, opening_hours, events)
        collection: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Seed { file } => {
            let path = cli.path.ok_or("Store path required for seed")?;
            commands::seed::run(&path, &file)?;
        }
        Commands::Inspect { format } => {
            let path = cli.path.ok_or("Store path required for inspect")?;
            commands::inspect::run(&path, &format)?;
        }
        Commands::Dump { collection } => {
            let path = cli.path.ok_or("Store path required for dump")?;
            commands::dump::run(&path, &collection)?;
        }
        Commands::Version => {
            println!("Krog CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Krog Core v{}", krog_core::VERSION);
        }
    }

    Ok(())
}
