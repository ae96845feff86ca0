//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod nearby;
pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};

/// Travel recommendation backend
#[derive(Parser)]
#[command(name = "travel-guide")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Search the catalog for places near a point
    Nearby(nearby::NearbyArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show catalog/server status
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Nearby(args) => nearby::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}
