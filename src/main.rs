//! travel-guide CLI entry point
//!
//! Travel recommendation backend - CLI + web server

use travel_guide::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
