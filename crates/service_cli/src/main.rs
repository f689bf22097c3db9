//! faceavg CLI - Command Line Driver for Face Reductions
//!
//! Loads a mesh case from disk, averages its cell quantities onto faces and
//! prints the face values together with their propagated derivatives.
//!
//! # Commands
//!
//! - `faceavg average --case <file>` - Average a case's cell values onto faces
//! - `faceavg check` - Show the resolved configuration and thread pool
//!
//! # Architecture
//!
//! As the service layer of the workspace, this crate only orchestrates
//! `ad_core` and `ad_operators`; it holds no numerical logic of its own.

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

/// Face reduction driver
#[derive(Parser)]
#[command(name = "faceavg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "faceavg.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average cell quantities onto faces
    Average {
        /// Path to case file (TOML)
        #[arg(long)]
        case: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check configuration and thread pool
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose selects debug output
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = config::CliConfig::load(&cli.config)?;
    debug!(?config, "configuration resolved");

    match cli.command {
        Commands::Average { case, format } => commands::average::run(&case, &format, &config),
        Commands::Check => commands::check::run(&cli.config, &config),
    }
}
