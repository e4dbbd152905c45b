//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod address;
pub mod config;
pub mod serve;

use clap::{Parser, Subcommand};

/// Address book with haversine proximity queries
#[derive(Parser)]
#[command(name = "geo-addresses")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Query and edit stored addresses directly
    Address(address::AddressArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Address(args) => address::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
