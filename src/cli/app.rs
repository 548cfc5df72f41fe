//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::{info, item};
use crate::storage::{self, FileFormat};

#[derive(Parser)]
#[command(name = "grocer")]
#[command(author, version, about = "File-backed grocery list manager")]
#[command(propagate_version = true)]
pub struct Cli {
    /// File containing the grocery list
    #[arg(long, short = 's', global = true, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// On-disk format of the grocery list
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = FileFormat::Json)]
    pub format: FileFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an item, or increase its quantity if it already exists
    Add {
        /// Item name (matched case-sensitively)
        name: String,

        /// Quantity to add (must be positive)
        quantity: i64,
    },

    /// Print every item, sorted by name
    List,

    /// Remove an item by exact name
    Remove {
        /// Item name
        name: String,
    },

    /// Show today's date, the operating system and the grocer version
    Info,

    /// Serve the grocery list over HTTP on the given port
    #[cfg(feature = "web")]
    Web {
        /// Port to listen on
        port: u16,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // `info` is the one command that works without a list file.
    if let Commands::Info = cli.command {
        return info::run();
    }

    let source = cli
        .source
        .ok_or_else(|| anyhow::anyhow!("Missing --source <FILE>"))?;
    let store = storage::open(source, cli.format);

    match cli.command {
        Commands::Add { name, quantity } => item::add(store.as_ref(), &name, quantity),
        Commands::List => item::list(store.as_ref()),
        Commands::Remove { name } => item::remove(store.as_ref(), &name),
        Commands::Info => unreachable!("handled above"),
        #[cfg(feature = "web")]
        Commands::Web { port } => crate::web::serve(store, port),
    }
}
