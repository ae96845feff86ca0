//! Status command handler
//!
//! Summarizes the configured catalog and optionally probes a running server.

use crate::catalog::open_catalog;
use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    println!("travel-guide v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if args.server {
        check_server_status(&config).await;
    }

    let catalog = open_catalog(&config);
    println!(
        "Catalog: {} ({})",
        catalog.name(),
        config.catalog.path.as_deref().unwrap_or("no file configured")
    );

    match catalog.fetch_all() {
        Ok(places) => {
            let located = places.iter().filter(|p| p.coordinates().is_some()).count();
            println!("  Places:  {}", places.len());
            println!("  Located: {}", located);
            println!("  Missing coordinates: {}", places.len() - located);
        }
        Err(e) => {
            println!("  Error: {}", e);
        }
    }
    println!();

    println!("Access:");
    println!(
        "  nearby:    {}",
        if config.auth.nearby_require_auth { "authenticated" } else { "public" }
    );
    println!(
        "  top rated: {}",
        if config.auth.top_rated_require_auth { "authenticated" } else { "public" }
    );

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
                if let Ok(status) = response.json::<serde_json::Value>().await {
                    if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                        println!("  Version: {}", version);
                    }
                    if let Some(places) = status.get("places").and_then(|v| v.as_u64()) {
                        println!("  Places:  {}", places);
                    }
                    if let Some(uptime) = status.get("uptime_secs").and_then(|v| v.as_u64()) {
                        println!("  Uptime:  {}s", uptime);
                    }
                }
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}
