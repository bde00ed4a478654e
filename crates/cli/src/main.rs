//! Chainring CLI - database migrations and catalog import.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (document store + session table)
//! chainring migrate
//!
//! # Import one catalog collection from data/<collection>.json
//! chainring import bikes
//! chainring import dealers --data-dir ./fixtures
//!
//! # Import everything
//! chainring import all
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `import` - Load catalog JSON files into the document store

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "chainring")]
#[command(author, version, about = "Chainring CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Import catalog data from JSON files
    Import {
        /// Directory holding the catalog JSON files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        #[command(subcommand)]
        target: ImportTarget,
    },
}

#[derive(Subcommand)]
enum ImportTarget {
    /// Append bikes from bikes.json
    Bikes,
    /// Replace logos from logos.json
    Logos,
    /// Replace accessories from accessories.json
    Accessories,
    /// Replace dealers from dealers.json
    Dealers,
    /// Import every collection
    All,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Import { data_dir, target } => match target {
            ImportTarget::Bikes => commands::import::bikes(&data_dir).await?,
            ImportTarget::Logos => commands::import::logos(&data_dir).await?,
            ImportTarget::Accessories => commands::import::accessories(&data_dir).await?,
            ImportTarget::Dealers => commands::import::dealers(&data_dir).await?,
            ImportTarget::All => commands::import::all(&data_dir).await?,
        },
    }
    Ok(())
}
